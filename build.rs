use vergen::{CargoBuilder, Emitter};
use vergen_git2::Git2Builder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cargo = CargoBuilder::default().target_triple(true).build()?;

    // Source tarballs have no repository; `--version` then reports "unknown".
    match Git2Builder::default().sha(true).build() {
        Ok(git2) => {
            Emitter::default()
                .add_instructions(&cargo)?
                .add_instructions(&git2)?
                .emit()?;
        }
        Err(_) => {
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
            Emitter::default().add_instructions(&cargo)?.emit()?;
        }
    }

    Ok(())
}
