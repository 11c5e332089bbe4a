use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// End-to-end test: run the binary from a scratch directory and assert the
/// three extension icons appear next to the executable (the tool resolves
/// its output relative to its own location, not the caller's cwd).
#[test]
fn test_driver_generates_the_full_icon_set() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();

    // Copy the binary into the temp dir so its outputs land there.
    let binary_path = get_binary_path();
    let staged_binary = temp_path.join("ext-icon-gen");
    std::fs::copy(&binary_path, &staged_binary).expect("Failed to stage binary");

    // Run from an unrelated cwd to prove output placement ignores it.
    let unrelated_cwd = temp_path.join("elsewhere");
    std::fs::create_dir(&unrelated_cwd).expect("Failed to create cwd");

    let output = Command::new(&staged_binary)
        .current_dir(&unrelated_cwd)
        .output()
        .expect("Failed to run ext-icon-gen");

    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("ext-icon-gen failed");
    }

    // Exactly the advertised set, next to the binary, each a decodable
    // RGB PNG of the advertised dimensions.
    for (size, filename) in [(16u32, "icon16.png"), (48, "icon48.png"), (128, "icon128.png")] {
        let icon_path = temp_path.join(filename);
        assert!(
            icon_path.exists(),
            "{} should exist at: {}",
            filename,
            icon_path.display()
        );

        let decoded = image::open(&icon_path)
            .unwrap_or_else(|e| panic!("Failed to decode {filename}: {e}"));
        assert_eq!(decoded.width(), size, "{filename} width");
        assert_eq!(decoded.height(), size, "{filename} height");
        assert!(
            matches!(decoded, image::DynamicImage::ImageRgb8(_)),
            "{filename} should be 24-bit RGB"
        );

        // One confirmation line per file.
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(
            stdout.contains(filename),
            "stdout should report {filename}, got:\n{stdout}"
        );
    }

    // Nothing was written where the process was started from.
    assert!(
        std::fs::read_dir(&unrelated_cwd)
            .expect("Failed to list cwd")
            .next()
            .is_none(),
        "the caller's cwd should stay empty"
    );
}

/// Gets the path to the ext-icon-gen binary (either from cargo build or
/// target directory)
fn get_binary_path() -> PathBuf {
    // First try to find in target/debug
    let debug_path = PathBuf::from("target/debug/ext-icon-gen");
    if debug_path.exists() {
        return debug_path;
    }

    // If not found, build it first
    let build_output = Command::new("cargo")
        .args(["build", "--bin", "ext-icon-gen"])
        .output()
        .expect("Failed to run cargo build");

    if !build_output.status.success() {
        panic!(
            "Failed to build ext-icon-gen binary: {}",
            String::from_utf8_lossy(&build_output.stderr)
        );
    }

    debug_path
}
