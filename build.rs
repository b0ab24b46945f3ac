//! Build script reporting the native libraries behind the camera, model and
//! pointer backends.
//!
//! Only OpenCV is linked at build time. The ONNX Runtime library is fetched by
//! `ort` unless `ORT_LIB_LOCATION` points at a local copy, and x11rb talks the
//! X11 protocol directly, so the XTest entry is informational: the extension
//! has to be present on the X server the binary runs against.

use std::env;
use std::process::Command;

/// A library looked up through pkg-config
struct NativeLib {
    /// Candidate pkg-config module names, first match wins
    modules: &'static [&'static str],
    /// Backend that needs the library
    needed_by: &'static str,
    /// Only relevant on targets containing this string
    target: Option<&'static str>,
    /// Package hints printed when the lookup fails
    install: &'static [&'static str],
}

const NATIVE_LIBS: &[NativeLib] = &[
    NativeLib {
        modules: &["opencv4", "opencv"],
        needed_by: "camera capture, frame annotation and the preview window",
        target: None,
        install: &[
            "Debian/Ubuntu: apt-get install libopencv-dev clang libclang-dev",
            "macOS: brew install opencv",
        ],
    },
    NativeLib {
        modules: &["xtst"],
        needed_by: "pointer button injection (XTest)",
        target: Some("linux"),
        install: &["Debian/Ubuntu: apt-get install libxtst-dev"],
    },
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=ORT_LIB_LOCATION");

    if pkg_config_version(&["--version"]).is_none() {
        println!("cargo:warning=pkg-config is missing; native library checks skipped");
        return;
    }

    let target = env::var("TARGET").unwrap_or_default();
    for lib in NATIVE_LIBS {
        if lib.target.is_some_and(|t| !target.contains(t)) {
            continue;
        }
        report(lib);
    }

    match env::var("ORT_LIB_LOCATION") {
        Ok(path) => println!("cargo:warning=Using ONNX Runtime from {path}"),
        Err(_) => println!("cargo:warning=ONNX Runtime will be downloaded by ort; set ORT_LIB_LOCATION to use a local build"),
    }
}

fn report(lib: &NativeLib) {
    let found = lib
        .modules
        .iter()
        .find_map(|module| pkg_config_version(&["--modversion", module]).map(|version| (module, version)));

    match found {
        Some((module, version)) => {
            println!("cargo:warning=Found {module} {version} for {}", lib.needed_by);
        }
        None => {
            println!(
                "cargo:warning=None of [{}] found; {} will not work",
                lib.modules.join(", "),
                lib.needed_by
            );
            for hint in lib.install {
                println!("cargo:warning=  {hint}");
            }
        }
    }
}

fn pkg_config_version(args: &[&str]) -> Option<String> {
    let output = Command::new("pkg-config").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
