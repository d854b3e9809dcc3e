extern crate rustc_version;
use rustc_version::version;

fn main() {
    let version = version().unwrap();
    assert!(version.major >= 1);
    assert!(version.minor >= 31);

    println!("cargo:rustc-check-cfg=cfg(x11)");

    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    match target_os.as_str() {
        "linux" | "freebsd" | "dragonfly" | "openbsd" | "netbsd" => {
            println!("cargo:rustc-cfg=x11");
        }
        _ => {}
    }
}
