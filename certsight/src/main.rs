//! certsight: Command-line tool for inspecting and validating X.509 certificates.

use anyhow::{Context, Result};
use base64::Engine;
use certsight_lib::{DigestAlgorithm, InspectOptions, OutputFormat, ValidationResult};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "certsight",
    about = "Inspect X.509 certificates and audit their security posture",
    long_about = "certsight parses certificates given as PEM, DER, raw Base64, or PEM\n\
                  wrapped in an extra Base64 layer. It prints OpenSSL-style dumps,\n\
                  grades key and signature strength, and checks validity windows,\n\
                  hostnames, and issuer chains.\n\n\
                  All single-certificate commands read from stdin when no file is given.",
    after_help = "EXAMPLES:\n\
                  \n  certsight show cert.pem\
                  \n  certsight show --json cert.pem\
                  \n  certsight inspect cert.pem\
                  \n  certsight validate --hostname www.example.com cert.pem\
                  \n  certsight validate --recurse --failures-only ./certs\
                  \n  certsight chain leaf.pem intermediate.pem root.pem\
                  \n  certsight convert --to der cert.pem\
                  \n  cat cert.pem | certsight summary"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Warn about certificates expiring within this window (e.g. 30d, 2w)
    #[arg(long, global = true, value_name = "DURATION")]
    warn_within: Option<String>,
    /// Evaluate validity at this Unix timestamp instead of now
    #[arg(long, global = true, value_name = "EPOCH")]
    at_time: Option<i64>,
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Display certificate information (like openssl x509 -text)
    Show {
        /// Certificate file. Reads from stdin if omitted.
        file: Option<PathBuf>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Parse and grade the certificate's security (exit code 1 = errors found)
    Inspect {
        /// Certificate file. Reads from stdin if omitted.
        file: Option<PathBuf>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Check validity window and hostname (exit code 0 = pass, 1 = fail)
    #[command(after_help = "EXAMPLES:\n\
                      \n  certsight validate cert.pem\
                      \n  certsight validate --hostname api.example.com cert.pem\
                      \n  certsight validate --hostname 10.0.0.1 cert.pem\
                      \n  certsight validate --warn-within 60d --recurse ./certs")]
    Validate {
        /// Certificate file or directory. Reads from stdin if omitted.
        file: Option<PathBuf>,
        /// Hostname or IP address the certificate must cover
        #[arg(long)]
        hostname: Option<String>,
        /// Only print failures (directory mode)
        #[arg(long)]
        failures_only: bool,
        /// Recurse into subdirectories (directory mode)
        #[arg(short, long)]
        recurse: bool,
        /// Output in JSON format (single file only)
        #[arg(long)]
        json: bool,
    },
    /// Validate an issuer chain given leaf first (exit 0 = valid, 2 = fail)
    #[command(after_help = "Each FILE may hold one certificate or a PEM bundle. Certificates\n\
                      are taken in order: leaf first, root last.\n\
                      \nEXAMPLES:\n\
                      \n  certsight chain leaf.pem intermediate.pem root.pem\
                      \n  certsight chain fullchain.pem")]
    Chain {
        /// Certificate files, leaf first
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Convert to PEM, DER, or text
    #[command(after_help = "If OUTPUT is given with --to der, raw DER bytes are written to it.\n\
                      On stdout DER is printed as Base64.\n\
                      \nEXAMPLES:\n\
                      \n  certsight convert --to pem cert.b64\
                      \n  certsight convert --to der cert.pem cert.der\
                      \n  certsight convert --to text cert.pem")]
    Convert {
        /// Input certificate file. Reads from stdin if omitted.
        file: Option<PathBuf>,
        /// Output file
        output: Option<PathBuf>,
        /// Output format: pem, der, text
        #[arg(long, value_name = "FORMAT")]
        to: String,
    },
    /// Compare two certificates field by field (exit code 1 = different)
    Compare {
        first: PathBuf,
        second: PathBuf,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Print a one-screen overview
    Summary {
        /// Certificate file. Reads from stdin if omitted.
        file: Option<PathBuf>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Print the certificate fingerprint
    Fingerprint {
        /// Certificate file. Reads from stdin if omitted.
        file: Option<PathBuf>,
        /// Hash algorithm: sha256, sha384, sha512, sha1
        #[arg(long, default_value = "sha256")]
        digest: String,
    },
}

/// Maximum file size for certificate inputs (10 MiB).
const MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

const PEM_END: &str = "-----END CERTIFICATE-----";

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            let meta = std::fs::metadata(path)
                .with_context(|| format!("Failed to stat file: {}", path.display()))?;
            if meta.len() > MAX_INPUT_BYTES {
                anyhow::bail!(
                    "File too large ({} bytes, max {} bytes): {}",
                    meta.len(),
                    MAX_INPUT_BYTES,
                    path.display()
                );
            }
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .take(MAX_INPUT_BYTES)
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Turn file bytes into certificate text. Binary (DER) content is Base64-encoded.
fn certificate_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => base64::engine::general_purpose::STANDARD.encode(bytes),
    }
}

fn read_certificate(file: Option<&PathBuf>) -> Result<String> {
    Ok(certificate_text(&read_input(file)?))
}

/// Split text holding several PEM blocks into one string per block.
/// Text without a complete block is returned unchanged.
fn split_pem_bundle(text: &str) -> Vec<String> {
    let blocks: Vec<String> = text
        .split_inclusive(PEM_END)
        .filter(|chunk| chunk.contains(PEM_END))
        .map(|chunk| chunk.trim().to_string())
        .collect();
    if blocks.is_empty() {
        vec![text.to_string()]
    } else {
        blocks
    }
}

/// Parse a duration string using humantime format.
///
/// Plain numbers (e.g. "3600") default to seconds. Otherwise, standard
/// humantime units are accepted: `s`, `m`, `h`, `d`, `w`, `months`, `y`, etc.
fn parse_duration(s: &str) -> Result<Duration> {
    if s.chars().all(|c| c.is_ascii_digit()) {
        let secs: u64 = s.parse().context("Invalid duration value")?;
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(s).with_context(|| format!("Invalid duration: '{s}'"))
}

/// Whole days in a duration, rounded down.
fn duration_days(d: Duration) -> i64 {
    i64::try_from(d.as_secs() / 86_400).unwrap_or(i64::MAX)
}

fn parse_digest(name: &str) -> Result<DigestAlgorithm> {
    match name.to_ascii_lowercase().as_str() {
        "sha256" => Ok(DigestAlgorithm::Sha256),
        "sha384" => Ok(DigestAlgorithm::Sha384),
        "sha512" => Ok(DigestAlgorithm::Sha512),
        "sha1" => Ok(DigestAlgorithm::Sha1),
        _ => anyhow::bail!(
            "Unsupported digest: {}. Use sha256, sha384, sha512, or sha1.",
            name
        ),
    }
}

fn build_options(global: &GlobalArgs) -> Result<InspectOptions> {
    let mut options = InspectOptions {
        at_time: global.at_time,
        ..InspectOptions::default()
    };
    if let Some(window) = &global.warn_within {
        options.expiry_warning_days = duration_days(parse_duration(window)?);
    }
    Ok(options)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Check if a path has a certificate file extension.
fn is_cert_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ["pem", "der", "crt", "cer", "b64"]
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    )
}

/// Find all certificate files in a directory, sorted by path.
fn find_cert_files(dir: &Path, recurse: bool) -> Vec<PathBuf> {
    let walker = if recurse {
        walkdir::WalkDir::new(dir)
    } else {
        walkdir::WalkDir::new(dir).max_depth(1)
    };
    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_cert_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// A single result from batch processing.
struct BatchResult {
    path: String,
    pass: bool,
    detail: String,
}

/// Process certificate files in parallel, printing `filename: result`.
///
/// Returns the number of failures.
fn run_batch<F>(files: &[PathBuf], failures_only: bool, op: F) -> usize
where
    F: Fn(&Path) -> BatchResult + Sync,
{
    let results: Vec<BatchResult> = files.par_iter().map(|f| op(f)).collect();

    let mut failures = 0;
    for r in &results {
        if !r.pass {
            failures += 1;
        }
        if failures_only && r.pass {
            continue;
        }
        if r.pass {
            println!("{}: {}", r.path, r.detail);
        } else {
            eprintln!("{}: {}", r.path, r.detail);
        }
    }
    failures
}

/// One-line verdict: `OK`, `OK (warning; ...)`, or `FAIL (error; ...)`.
fn verdict(result: &ValidationResult) -> String {
    if result.is_valid() {
        if result.warnings().is_empty() {
            "OK".to_string()
        } else {
            format!("OK ({})", result.warnings().join("; "))
        }
    } else {
        format!("FAIL ({})", result.errors().join("; "))
    }
}

/// Print a single validation result (JSON or text).
fn print_validation(label: &str, result: &ValidationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    if result.is_valid() {
        println!("{}: {}", label, verdict(result));
    } else {
        eprintln!("{}: {}", label, verdict(result));
        for warning in result.warnings() {
            eprintln!("  warning: {}", warning);
        }
    }
    Ok(())
}

fn label_for(file: Option<&PathBuf>) -> String {
    file.map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);
    let options = build_options(&cli.global)?;

    match &cli.command {
        Commands::Show { file, json } => {
            let text = read_certificate(file.as_ref())?;
            let cert = certsight_lib::parse_certificate_with_options(&text, &options)?;
            if *json {
                println!("{}", certsight_lib::to_json(&cert)?);
            } else {
                print!("{}", certsight_lib::format_certificate_as_text(&cert));
            }
        }
        Commands::Inspect { file, json } => {
            let text = read_certificate(file.as_ref())?;
            let report = certsight_lib::inspect_certificate_with_options(&text, &options);
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Security level: {}", report.security_level);
                for e in &report.errors {
                    println!("  error: {}", e);
                }
                for w in &report.warnings {
                    println!("  warning: {}", w);
                }
                for r in &report.recommendations {
                    println!("  recommendation: {}", r);
                }
            }
            if !report.is_valid {
                std::process::exit(1);
            }
        }
        Commands::Validate {
            file,
            hostname,
            failures_only,
            recurse,
            json,
        } => {
            if let Some(dir) = file.as_ref().filter(|p| p.is_dir()) {
                let files = find_cert_files(dir, *recurse);
                if files.is_empty() {
                    anyhow::bail!("No certificate files found in {}", dir.display());
                }
                let failures = run_batch(&files, *failures_only, |path| {
                    let path_label = path.display().to_string();
                    match read_input(Some(&path.to_path_buf())) {
                        Ok(bytes) => {
                            let result = certsight_lib::validate_certificate_with_options(
                                &certificate_text(&bytes),
                                hostname.as_deref(),
                                &options,
                            );
                            BatchResult {
                                path: path_label,
                                pass: result.is_valid(),
                                detail: verdict(&result),
                            }
                        }
                        Err(e) => BatchResult {
                            path: path_label,
                            pass: false,
                            detail: format!("FAIL ({:#})", e),
                        },
                    }
                });
                tracing::debug!(files = files.len(), failures, "batch validation finished");
                if failures > 0 {
                    std::process::exit(1);
                }
            } else {
                let text = read_certificate(file.as_ref())?;
                let result = certsight_lib::validate_certificate_with_options(
                    &text,
                    hostname.as_deref(),
                    &options,
                );
                print_validation(&label_for(file.as_ref()), &result, *json)?;
                if !result.is_valid() {
                    std::process::exit(1);
                }
            }
        }
        Commands::Chain { files, json } => {
            let mut members = Vec::new();
            for path in files {
                members.extend(split_pem_bundle(&read_certificate(Some(path))?));
            }
            let inputs: Vec<&str> = members.iter().map(String::as_str).collect();
            let result = certsight_lib::validate_certificate_chain_with_options(&inputs, &options);
            print_validation(&format!("chain of {}", inputs.len()), &result, *json)?;
            if !result.is_valid() {
                std::process::exit(2);
            }
        }
        Commands::Convert { file, output, to } => {
            let format: OutputFormat = to.parse()?;
            let text = read_certificate(file.as_ref())?;
            let converted = certsight_lib::convert_certificate(&text, format)?;
            match output {
                Some(path) => {
                    let bytes = match format {
                        OutputFormat::Der => base64::engine::general_purpose::STANDARD
                            .decode(converted.as_bytes())
                            .context("Failed to decode converted DER")?,
                        OutputFormat::Pem | OutputFormat::Text => converted.into_bytes(),
                    };
                    std::fs::write(path, bytes)
                        .with_context(|| format!("Failed to write file: {}", path.display()))?;
                }
                None => {
                    if converted.ends_with('\n') {
                        print!("{}", converted);
                    } else {
                        println!("{}", converted);
                    }
                }
            }
        }
        Commands::Compare {
            first,
            second,
            json,
        } => {
            let a = certsight_lib::parse_certificate_with_options(
                &read_certificate(Some(first))?,
                &options,
            )
            .with_context(|| format!("Failed to parse {}", first.display()))?;
            let b = certsight_lib::parse_certificate_with_options(
                &read_certificate(Some(second))?,
                &options,
            )
            .with_context(|| format!("Failed to parse {}", second.display()))?;
            let comparison = certsight_lib::compare_certificates(&a, &b);
            if *json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else if comparison.identical {
                println!("identical");
            } else {
                for d in &comparison.differences {
                    println!("{}:\n  < {}\n  > {}", d.field, d.left, d.right);
                }
            }
            if !comparison.identical {
                std::process::exit(1);
            }
        }
        Commands::Summary { file, json } => {
            let text = read_certificate(file.as_ref())?;
            let cert = certsight_lib::parse_certificate_with_options(&text, &options)?;
            let summary = certsight_lib::summarize_certificate(&cert);
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{} [{:?}]", summary.title, summary.status);
                println!("{}", summary.subtitle);
                for d in &summary.details {
                    println!("  {}: {}", d.label, d.value);
                }
            }
        }
        Commands::Fingerprint { file, digest } => {
            let alg = parse_digest(digest)?;
            let text = read_certificate(file.as_ref())?;
            let cert = certsight_lib::parse_certificate_with_options(&text, &options)?;
            println!("{}", cert.fingerprint(alg));
        }
    }

    Ok(())
}
