use cfg_aliases::cfg_aliases;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(android_platform)");

    cfg_aliases! {
        android_platform: { target_os = "android" },
    }
}
