use anyhow::Error;
use vergen_gitcl::{Emitter, GitclBuilder};

/// embeds the short git sha and dirty flag for the status command.
///
/// a `VERGEN_GIT_SHA` set by the packaging environment wins over the local checkout.
pub fn main() -> Result<(), Error> {
    match std::env::var("VERGEN_GIT_SHA") {
        Ok(sha) if sha != "unknown" => {
            println!("cargo:rustc-env=VERGEN_GIT_SHA={sha}");
            println!("cargo:rustc-env=VERGEN_GIT_DIRTY=false");
            Ok(())
        }
        _ => {
            let gitcl = GitclBuilder::default().sha(true).dirty(false).build()?;
            Emitter::default().add_instructions(&gitcl)?.emit()?;
            Ok(())
        }
    }
}
