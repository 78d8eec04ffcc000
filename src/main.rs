//! html-charset CLI - guess the charset of HTML pages

mod logging;

use clap::Parser;
use html_charset::{Conversion, Detection, Encoded, Guesser, HeaderCase};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Guess the character encoding of HTML documents.
///
/// Reads the Content-Type header (given with --header) and <meta> charset
/// declarations, and reports the charset to decode each input with.
/// With --encode, writes the input converted to UTF-8 instead.
#[derive(Parser, Debug)]
#[command(name = "html-charset")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input HTML file(s) to inspect (or http(s) URLs, with the `http` feature)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Response header line, e.g. "Content-Type: text/html; charset=utf-8" (repeatable)
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// File of "Name: Value" header lines
    #[arg(long)]
    headers_file: Option<PathBuf>,

    /// Charset reported when nothing usable is declared
    #[arg(short = 'd', long, default_value = "UTF-8")]
    default: String,

    /// Number of leading bytes searched for <meta> tags
    #[arg(long, default_value_t = html_charset::DEFAULT_PRESCAN_BYTES)]
    prescan_bytes: usize,

    /// Search the whole document for <meta> tags
    #[arg(long)]
    scan_all: bool,

    /// Match the Content-Type header name in any letter case
    #[arg(long)]
    case_insensitive_headers: bool,

    /// Write the input converted to UTF-8 instead of reporting the charset
    #[arg(short = 'e', long)]
    encode: bool,

    /// Output file for --encode (default: stdout)
    #[arg(short = 'o', long, requires = "encode")]
    output: Option<PathBuf>,

    /// Output format: text (default) or json
    #[arg(short = 'f', long, default_value = "text")]
    format: OutputFormat,

    /// Log how each charset was chosen to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    logging::setup(args.verbose);

    let (guesser, headers) = match configure(&args) {
        Ok(configured) => configured,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut exit_code = ExitCode::SUCCESS;

    for input in &args.inputs {
        if let Err(e) = process_input(input, &guesser, &headers, &args) {
            eprintln!("Error processing {input}: {e}");
            exit_code = ExitCode::FAILURE;
        }
    }

    exit_code
}

fn configure(args: &Args) -> Result<(Guesser, String), Box<dyn std::error::Error>> {
    let mut guesser = Guesser::new();
    guesser.default_encoding(&args.default)?;
    guesser.prescan_bytes((!args.scan_all).then_some(args.prescan_bytes));
    if args.case_insensitive_headers {
        guesser.header_case(HeaderCase::Insensitive);
    }

    let mut headers = args.headers.join("\n");
    if let Some(path) = &args.headers_file {
        if !headers.is_empty() {
            headers.push('\n');
        }
        headers.push_str(&fs::read_to_string(path)?);
    }

    Ok((guesser, headers))
}

fn process_input(
    input: &str,
    guesser: &Guesser,
    headers: &str,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "http")]
    if html_charset::http::is_url(input) {
        return process_url(input, guesser, headers, args);
    }

    let data = fs::read(input)?;
    report(input, &data, guesser, headers, args)
}

#[cfg(feature = "http")]
fn process_url(
    url: &str,
    guesser: &Guesser,
    headers: &str,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let max_bytes = if args.encode || args.scan_all {
        None
    } else {
        Some(args.prescan_bytes)
    };
    let fetched = html_charset::http::fetch_url(url, max_bytes)?;
    if max_bytes.is_some() {
        log::info!(
            "{url}: range request {}, read {} bytes",
            if fetched.range_supported { "honored" } else { "ignored" },
            fetched.data.len()
        );
    }

    // Response header names arrive lowercased.
    let mut blob: Vec<String> = fetched
        .headers
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect();
    if !headers.is_empty() {
        // Explicit --header lines take precedence over the response.
        blob.insert(0, headers.to_string());
    }
    let mut guesser = guesser.clone();
    guesser.header_case(HeaderCase::Insensitive);

    report(url, &fetched.data, &guesser, &blob.join("\n"), args)
}

fn report(
    input: &str,
    data: &[u8],
    guesser: &Guesser,
    headers: &str,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.encode {
        let encoded = guesser.encode_with_headers(data, headers);
        write_encoded(&encoded, args)?;
        log::info!(
            "{input}: {} -> UTF-8 ({})",
            encoded.source,
            conversion_name(encoded.conversion)
        );
        return Ok(());
    }

    let detection = guesser.detect_with_headers(data, headers);
    match args.format {
        OutputFormat::Text => print_text_output(input, &detection),
        OutputFormat::Json => print_json_output(input, &detection),
    }
    Ok(())
}

fn write_encoded(encoded: &Encoded<'_>, args: &Args) -> io::Result<()> {
    match &args.output {
        Some(path) => fs::write(path, &encoded.bytes),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&encoded.bytes)?;
            stdout.flush()
        }
    }
}

const fn conversion_name(conversion: Conversion) -> &'static str {
    match conversion {
        Conversion::Unchanged => "unchanged",
        Conversion::Transcoded => "transcoded",
        Conversion::Replaced => "replaced invalid sequences",
        Conversion::Relabeled => "relabeled",
    }
}

fn print_text_output(input: &str, detection: &Detection) {
    println!("File: {input}");
    println!("  Charset: {}", detection.charset);
    println!("  Source: {}", detection.source);
    println!("  Convertible: {}", detection.charset.is_convertible());
    if let Some(token) = &detection.header_token {
        println!("  Header token: {token}");
    }
    if let Some(token) = &detection.meta_token {
        println!("  Meta token: {token}");
    }
    println!();
}

fn print_json_output(input: &str, detection: &Detection) {
    let token = |t: &Option<String>| match t {
        Some(t) => format!("\"{}\"", json_escape(t)),
        None => "null".to_string(),
    };

    println!(
        r#"{{"file":"{}","charset":"{}","source":"{}","convertible":{},"header_token":{},"meta_token":{}}}"#,
        json_escape(input),
        detection.charset,
        detection.source,
        detection.charset.is_convertible(),
        token(&detection.header_token),
        token(&detection.meta_token),
    );
}

fn json_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
