//! The `gml2txt` run: gather paths, guard, flatten, print the tally.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use gmlkit_io_fs::{
    C_EXT_SOURCE, FlattenError, ReportFlatten, SpecFlattenOptions, flatten_copy,
    is_same_directory,
};
use tracing::debug;

use crate::cli::commands::CliArgs;
use crate::cli::prompt::{C_PROMPT_OUTPUT, C_PROMPT_SOURCE, resolve_path};

pub const C_BANNER: &str = "--- GML to TXT File Converter (Flat Output) ---";

/// How a run ended. Every variant is a normal return.
#[derive(Debug)]
pub enum EnumRunOutcome {
    /// A path was left blank.
    MissingPaths,
    /// Source and output name the same directory; nothing was scanned.
    SameDirectory,
    /// The copier rejected its inputs before traversal.
    Aborted(FlattenError),
    /// Traversal ran; per-file errors, if any, are in the report.
    Completed(ReportFlatten),
}

/// Drive one conversion. `Err` only for failures reading or writing the
/// terminal streams.
pub fn run_convert<R, W>(args: &CliArgs, reader: &mut R, writer: &mut W) -> Result<EnumRunOutcome>
where
    R: BufRead,
    W: Write,
{
    writeln!(writer, "{C_BANNER}")?;

    let path_source = resolve_path(args.source.as_deref(), reader, writer, C_PROMPT_SOURCE)
        .context("failed to read source path")?;
    let path_output = resolve_path(args.output.as_deref(), reader, writer, C_PROMPT_OUTPUT)
        .context("failed to read output path")?;

    let (Some(path_source), Some(path_output)) = (path_source, path_output) else {
        writeln!(writer, "Error: Both source and output paths are required.")?;
        return Ok(EnumRunOutcome::MissingPaths);
    };

    if is_same_directory(&path_source, &path_output) {
        writeln!(
            writer,
            "Error: Source and output directories cannot be the same if flattening, \
             as this could overwrite files in the source tree."
        )?;
        return Ok(EnumRunOutcome::SameDirectory);
    }

    let spec_options = SpecFlattenOptions::new(path_source, path_output);
    debug!("Flatten options: {spec_options:?}");

    let report = match flatten_copy(&spec_options) {
        Ok(report) => report,
        Err(e) => {
            writeln!(writer, "Error: {e}")?;
            return Ok(EnumRunOutcome::Aborted(e));
        }
    };

    write_summary(&report, writer)?;
    Ok(EnumRunOutcome::Completed(report))
}

fn write_summary<W: Write>(report: &ReportFlatten, writer: &mut W) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "--- Process Complete ---")?;
    writeln!(writer, "Found {} .{C_EXT_SOURCE} files.", report.cnt_found)?;
    writeln!(
        writer,
        "Successfully converted and copied {} files to '{}'.",
        report.cnt_converted,
        report.path_dir_output.display()
    )?;
    if report.error_count() > 0 {
        writeln!(writer, "{} file(s) could not be copied:", report.error_count())?;
        for spec_error in &report.errors {
            writeln!(writer, "  {spec_error}")?;
        }
    }
    debug!("{report}");
    writer.flush()?;
    Ok(())
}
