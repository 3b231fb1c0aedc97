//! Info command implementation.

use crate::utils::space_savings;
use oxigz_core::MappedInput;
use oxigz_gzip::GzipMember;
use oxigz_gzip::header::TRAILER_LEN;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON serializable FEXTRA subfield.
#[derive(Debug, Serialize, Deserialize)]
struct SubfieldJson {
    id: String,
    len: usize,
}

/// JSON output for `oxigz info --json`.
#[derive(Debug, Serialize, Deserialize)]
struct MemberJson {
    file: String,
    size: usize,
    flags: u8,
    text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    mtime: Option<u32>,
    extra_flags: u8,
    os: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra: Option<Vec<SubfieldJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header_crc: Option<u16>,
    payload_start: usize,
    compressed_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    crc32: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uncompressed_size: Option<u32>,
}

impl MemberJson {
    fn from_member(input: &Path, member: &GzipMember<'_>) -> Self {
        let trailer = member.trailer();
        let extra = member.extra().map(|_| {
            member
                .extra_subfields()
                .filter_map(Result::ok)
                .map(|field| SubfieldJson {
                    id: String::from_utf8_lossy(&field.id).into_owned(),
                    len: field.data.len(),
                })
                .collect()
        });

        Self {
            file: input.display().to_string(),
            size: member.total_len(),
            flags: member.flags(),
            text: member.is_text(),
            mtime: member.mtime(),
            extra_flags: member.extra_flags(),
            os: member.os().to_string(),
            name: member.name_str().map(|s| s.into_owned()),
            comment: member.comment_str().map(|s| s.into_owned()),
            extra,
            header_crc: member.header_crc(),
            payload_start: member.payload_start(),
            compressed_size: compressed_size(member),
            crc32: trailer.map(|t| t.crc32),
            uncompressed_size: trailer.map(|t| t.size),
        }
    }
}

/// Length of the DEFLATE stream, assuming the trailer closes the input.
fn compressed_size(member: &GzipMember<'_>) -> usize {
    member.data_len().saturating_sub(TRAILER_LEN)
}

pub fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mapped = MappedInput::open(input)?;
    let member = GzipMember::parse(&mapped)?;

    if json {
        let output = MemberJson::from_member(input, &member);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("gzip Information");
    println!("================");
    println!("File: {}", input.display());
    println!("Size: {} bytes", member.total_len());

    println!();
    println!("Header:");
    println!("  Flags: {:#04x}", member.flags());
    if member.has_reserved_flags() {
        println!("  Warning: reserved flag bits set");
    }
    if member.is_text() {
        println!("  Text: yes");
    }
    if let Some(mtime) = member.mtime() {
        println!("  Modification time: {} (Unix timestamp)", mtime);
    }
    println!("  Extra flags: {}", member.extra_flags());
    println!("  Operating system: {}", member.os());
    if let Some(name) = member.name_str() {
        println!("  Original filename: {}", name);
    }
    if let Some(comment) = member.comment_str() {
        println!("  Comment: {}", comment);
    }
    if member.extra().is_some() {
        for field in member.extra_subfields() {
            match field {
                Ok(field) => println!(
                    "  Extra field: {} ({} bytes)",
                    String::from_utf8_lossy(&field.id),
                    field.data.len()
                ),
                Err(e) => println!("  Extra field: malformed ({})", e),
            }
        }
    }
    if let Some(crc) = member.header_crc() {
        let status = match member.verify_header_crc() {
            Ok(()) => "ok",
            Err(_) => "MISMATCH",
        };
        println!("  Header CRC: {:#06x} ({})", crc, status);
    }
    println!("  Header length: {} bytes", member.payload_start());

    println!();
    println!("Contents:");
    println!("  Compressed size: {} bytes", compressed_size(&member));
    match member.trailer() {
        Some(trailer) => {
            println!("  Uncompressed size: {} bytes (mod 2^32)", trailer.size);
            println!("  CRC-32: {:#010x}", trailer.crc32);
            println!(
                "  Compression ratio: {:.1}%",
                space_savings(compressed_size(&member) as u64, u64::from(trailer.size))
            );
        }
        None => println!("  Trailer: missing"),
    }

    Ok(())
}
