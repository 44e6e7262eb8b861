// Command line front end for document verification.

use clap::{Parser, Subcommand};
use idscan::{
    models::{RequestEnvelope, VerificationRequest},
    utils::VerifyError,
    Config, DocumentVerifier,
};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "idscan", version, about = "Verify Aadhaar, PAN and APAAR documents from scanned images")]
struct Cli {
    /// JSON config file (language, tessdata_dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Tesseract language, e.g. eng or eng+hin
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Directory containing Tesseract traineddata files
    #[arg(long, global = true)]
    tessdata: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check an identifier on a document image against a user-supplied value
    Verify {
        #[arg(long)]
        image: PathBuf,
        /// aadhaar, pan or apaar
        #[arg(long)]
        doc_type: String,
        /// The identifier the user typed in
        #[arg(long)]
        input: String,
    },
    /// Run a JSON request ({document_type, user_input, image_base64})
    Request {
        #[arg(long)]
        file: PathBuf,
    },
    /// Print the cleaned OCR lines and the extracted fields of an image
    Extract {
        #[arg(long)]
        image: PathBuf,
    },
}

#[derive(Serialize)]
struct ExtractReport<'a> {
    lines: &'a [String],
    details: &'a idscan::ExtractedDetails,
}

fn load_config(cli: &Cli) -> Result<Config, VerifyError> {
    let base = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env(),
    };
    Ok(base.with_overrides(cli.lang.clone(), cli.tessdata.clone()))
}

fn read_image(path: &Path) -> Result<Vec<u8>, VerifyError> {
    std::fs::read(path).map_err(|e| {
        VerifyError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read image {}: {}", path.display(), e),
        ))
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), VerifyError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), VerifyError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!("Using OCR language {}", config.language);
    let verifier = DocumentVerifier::new(&config);

    match cli.command {
        Command::Verify { image, doc_type, input } => {
            let request = VerificationRequest::new(read_image(&image)?, doc_type, input);
            print_json(&verifier.verify(&request))
        }
        Command::Request { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let envelope: RequestEnvelope = serde_json::from_str(&raw)
                .map_err(|e| VerifyError::InvalidRequest(format!("{}: {}", file.display(), e)))?;
            print_json(&verifier.verify(&envelope.into_request()?))
        }
        Command::Extract { image } => {
            let extraction = verifier.extract(&read_image(&image)?)?;
            print_json(&ExtractReport {
                lines: &extraction.lines,
                details: &extraction.details,
            })
        }
    }
}
