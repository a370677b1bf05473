//! CLI argument parsing
//!
//! `<program> <source_directory> <output_file> [compression_level] [config_file]`
//!
//! Arguments after `config_file` are ignored.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub source_dir: String,
    pub output_file: String,
    pub compression_level: Option<String>,
    pub config_file: Option<String>,
}

/// Parse command line arguments (including the program name at index 0)
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let positional = args.get(1..).unwrap_or_default();

    let source_dir = positional
        .first()
        .ok_or_else(|| "Missing required argument: SOURCE_DIRECTORY".to_string())?;
    let output_file = positional
        .get(1)
        .ok_or_else(|| "Missing required argument: OUTPUT_FILE".to_string())?;

    if let Some(extra) = positional.get(4..)
        && !extra.is_empty()
    {
        log::debug!("Ignoring extra arguments: {}", extra.join(" "));
    }

    Ok(CliArgs {
        source_dir: source_dir.clone(),
        output_file: output_file.clone(),
        compression_level: positional.get(2).cloned(),
        config_file: positional.get(3).cloned(),
    })
}
