use std::env;
use std::path::PathBuf;

// keyprobe links libavformat, libavcodec and libavutil through
// ffmpeg-sys-next. On Windows there is no pkg-config, so point users at a
// vcpkg install when FFMPEG_DIR is missing.
fn main() {
    for variable in ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_DYNAMIC", "VCPKGRS_TRIPLET"] {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    if env::var_os("FFMPEG_DIR").is_some() {
        return;
    }

    let Ok(vcpkg_root) = env::var("VCPKG_ROOT") else {
        println!(
            "cargo:warning=keyprobe needs FFmpeg development libraries. On Windows, install them with vcpkg (ffmpeg[avcodec,avformat]) and set FFMPEG_DIR."
        );
        return;
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let ffmpeg_dir = PathBuf::from(&vcpkg_root).join("installed").join(&triplet);

    if ffmpeg_dir.exists() {
        println!(
            "cargo:warning=Found vcpkg FFmpeg at {}; set FFMPEG_DIR={} so ffmpeg-sys-next uses it explicitly.",
            ffmpeg_dir.display(),
            ffmpeg_dir.display(),
        );
        if env::var_os("VCPKGRS_DYNAMIC").is_none() {
            println!(
                "cargo:warning=Set VCPKGRS_DYNAMIC=1 when linking a dynamic vcpkg FFmpeg build."
            );
        }
    } else {
        println!(
            "cargo:warning=VCPKG_ROOT is set but {} does not exist; install FFmpeg for triplet {triplet}.",
            ffmpeg_dir.display(),
        );
    }
}
