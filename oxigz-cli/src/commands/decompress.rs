//! Decompress command implementation.

use crate::utils::{confirm_overwrite, default_output_path, space_savings, stored_name_path};
use filetime::FileTime;
use oxigz_core::MappedInput;
use oxigz_gzip::{GzipMember, UnpackConfig, VerifyConfig};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Options for decompressing one file.
pub struct DecompressOptions<'a> {
    pub output: Option<&'a Path>,
    pub chunk_size: NonZeroUsize,
    pub buffer_size: Option<usize>,
    pub verify: bool,
    pub restore_name: bool,
    pub force: bool,
    pub verbose: bool,
}

pub fn cmd_decompress(
    input: &Path,
    options: &DecompressOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mapped = MappedInput::open(input)?;
    let member = GzipMember::parse(&mapped)?.with_chunk_size(options.chunk_size);

    let output = resolve_output(input, &member, options)?;
    if output.exists() && !options.force && !confirm_overwrite(&output)? {
        println!("Skipped: {} (output exists)", output.display());
        return Ok(());
    }

    let verify = if options.verify {
        VerifyConfig::STRICT
    } else {
        VerifyConfig::NONE
    };

    let data = match options.buffer_size {
        Some(size) => {
            let mut buf = vec![0u8; size];
            let written = member.decompress_verified(&mut buf, verify)?;
            buf.truncate(written);
            buf
        }
        None => member.decompress_to_vec(&UnpackConfig {
            verify,
            ..UnpackConfig::DEFAULT
        })?,
    };

    fs::write(&output, &data)?;

    if options.restore_name {
        if let Some(mtime) = member.mtime() {
            filetime::set_file_mtime(&output, FileTime::from_unix_time(i64::from(mtime), 0))?;
        }
    }

    if options.verbose {
        println!("  Input: {} ({} bytes)", input.display(), member.total_len());
        println!("  Output: {} ({} bytes)", output.display(), data.len());
        println!(
            "  Saved: {:.1}%",
            space_savings(member.total_len() as u64, data.len() as u64)
        );
        if !options.verify {
            println!("  Integrity checks skipped");
        }
    }

    Ok(())
}

fn resolve_output(
    input: &Path,
    member: &GzipMember<'_>,
    options: &DecompressOptions,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(output) = options.output {
        return Ok(output.to_path_buf());
    }

    if options.restore_name {
        let stored = member
            .name_str()
            .and_then(|name| stored_name_path(input, &name));
        if let Some(path) = stored {
            return Ok(path);
        }
    }

    default_output_path(input).ok_or_else(|| {
        format!(
            "{}: unknown suffix, use --output to name the result",
            input.display()
        )
        .into()
    })
}
