#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    // The icon is optional: skip resource embedding when it is not shipped.
    if !std::path::Path::new("res/rhoslog.ico").exists() {
        return;
    }

    let mut res = WindowsResource::new();
    res.set_icon("res/rhoslog.ico")
        .set("FileDescription", "rHOSlog CLI")
        .set("ProductName", "rHOSlog")
        .set("OriginalFilename", "rhoslog.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed icon resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
