use std::env;
use std::fs;
use std::path::Path;
use vergen::{BuildBuilder, CargoBuilder, Emitter, RustcBuilder};
use vergen_gitcl::{Emitter as GitEmitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Refuse to build for targets without a native bundle
    select_native_bundle()?;

    let build = BuildBuilder::default().build_timestamp(true).build()?;

    let cargo = CargoBuilder::default()
        .opt_level(true)
        .target_triple(true)
        .build()?;

    let rustc = RustcBuilder::default()
        .semver(true)
        .channel(true)
        .build()?;

    let gitcl = GitclBuilder::default()
        .sha(true)
        .branch(true)
        .commit_timestamp(true)
        .dirty(true)
        .build()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&rustc)?
        .emit()?;

    GitEmitter::default().add_instructions(&gitcl)?.emit()?;

    copy_configs()?;

    Ok(())
}

/// Mirrors `Platform::from_os_name` for the compilation target.
fn select_native_bundle() -> Result<(), Box<dyn std::error::Error>> {
    let target_os = env::var("CARGO_CFG_TARGET_OS")?;
    let lowered = target_os.to_lowercase();

    let bundle = if lowered.contains("linux") {
        "natives-linux"
    } else if lowered.contains("mac") {
        "natives-macos"
    } else if lowered.contains("windows") {
        "natives-windows"
    } else {
        return Err(format!("unsupported operating system: {target_os}").into());
    };

    println!("cargo:rustc-env=CUBEGL_NATIVE_BUNDLE={bundle}");
    Ok(())
}

fn copy_configs() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::var("OUT_DIR")?;
    let profile = env::var("PROFILE")?;

    // OUT_DIR is target/<profile>/build/cube-gl-xxx/out, configs go to target/<profile>/config
    let target_dir = Path::new(&out_dir)
        .parent()
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .ok_or("Could not determine target directory")?;

    let config_out_dir = target_dir.join("config");
    fs::create_dir_all(&config_out_dir)?;

    let profiles: &[&str] = if profile == "release" {
        &["release"]
    } else {
        &["debug", "release"]
    };

    for name in profiles {
        let source = Path::new("config").join(format!("{name}.toml"));
        if source.exists() {
            fs::copy(&source, config_out_dir.join(format!("{name}.toml")))?;
            println!("cargo:rerun-if-changed={}", source.display());
        }
    }

    Ok(())
}
