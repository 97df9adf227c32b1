use anyhow::Result;

use newslens_core::services::LANGUAGES;

pub fn run() -> Result<()> {
    println!("Supported languages:\n");
    for language in LANGUAGES {
        println!("  {:<6} {}", language.code, language.name);
    }
    Ok(())
}
