//! `plainzip inject`: the padding-injector CLI of §6 — `-i INPUT -o OUTPUT
//! [-p PREPEND] [-a APPEND]`.

use std::path::Path;

use plainzip_core::error::Result;

/// Read the ZIP at `input`, splice `prepend`/`append` around it patching
/// every internal offset (§4.9), and write the result to `output`.
pub fn cmd_inject(
    input: &Path,
    output: &Path,
    prepend: Option<&str>,
    append: Option<&str>,
) -> Result<()> {
    let data = std::fs::read(input)?;
    let prepend = prepend.unwrap_or_default().as_bytes();
    let append = append.unwrap_or_default().as_bytes();

    let patched = plainzip_archive::inject(&data, prepend, append)?;

    std::fs::write(output, &patched)?;
    println!(
        "wrote {} ({} bytes, prepend {} / append {})",
        output.display(),
        patched.len(),
        prepend.len(),
        append.len()
    );
    Ok(())
}
