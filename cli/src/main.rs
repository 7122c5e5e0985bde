use clap::{Parser, Subcommand};
use hound::WavSpec;
use log::info;
use std::fs::File;
use std::path::PathBuf;
use tonecast_core::{Receiver, Transmitter, DEFAULT_BAUD, DEFAULT_TRAINING_SECONDS, SAMPLE_RATE};

#[derive(Parser)]
#[command(name = "tonecast")]
#[command(about = "AFSK modem for voice-band audio links")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a payload file into a WAV transmission
    Send {
        /// Input payload file
        #[arg(value_name = "INPUT.BIN")]
        input: PathBuf,

        /// Output WAV file (48 kHz mono 16-bit)
        #[arg(value_name = "OUTPUT.WAV")]
        output: PathBuf,

        /// Symbol rate (300, 600, 1200, 2400 or 6000)
        #[arg(short, long, default_value_t = DEFAULT_BAUD)]
        baud: u32,

        /// Training preamble length in seconds
        #[arg(short, long, default_value_t = DEFAULT_TRAINING_SECONDS)]
        training_seconds: f32,
    },

    /// Decode a WAV recording back to the payload
    Recv {
        /// Input WAV file (48 kHz mono 16-bit)
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,

        /// Output payload file (payload goes to stdout if omitted)
        #[arg(value_name = "OUTPUT.BIN")]
        output: Option<PathBuf>,

        /// Symbol rate (must match the transmitter)
        #[arg(short, long, default_value_t = DEFAULT_BAUD)]
        baud: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Send {
            input,
            output,
            baud,
            training_seconds,
        } => send_command(&input, &output, baud, training_seconds),
        Commands::Recv {
            input,
            output,
            baud,
        } => recv_command(&input, output.as_deref(), baud),
    }
}

fn send_command(
    input: &PathBuf,
    output: &PathBuf,
    baud: u32,
    training_seconds: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = std::fs::read(input)?;
    info!("read {} bytes from {}", payload.len(), input.display());

    let transmitter = Transmitter::with_training(baud, training_seconds)?;
    let samples = transmitter.encode_to_samples(&payload);

    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let file = File::create(output)?;
    let mut writer = hound::WavWriter::new(file, spec)?;
    for sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    println!(
        "Wrote {} ({:.2} s of audio at {} baud)",
        output.display(),
        transmitter.airtime(payload.len()),
        baud
    );
    Ok(())
}

fn recv_command(
    input: &PathBuf,
    output: Option<&std::path::Path>,
    baud: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(input)?;
    let mut reader = hound::WavReader::new(file)?;

    let spec = reader.spec();
    if spec.channels != 1
        || spec.sample_rate != SAMPLE_RATE as u32
        || spec.bits_per_sample != 16
        || spec.sample_format != hound::SampleFormat::Int
    {
        return Err(format!(
            "unsupported WAV format: {} Hz, {} channels, {} bits (need {} Hz mono 16-bit)",
            spec.sample_rate, spec.channels, spec.bits_per_sample, SAMPLE_RATE
        )
        .into());
    }

    let samples = reader.samples::<i16>().collect::<Result<Vec<i16>, _>>()?;
    info!("read {} samples from {}", samples.len(), input.display());

    let receiver = Receiver::new(baud)?;
    let (payload, corrected_bits) = receiver.decode_burst(&samples);

    if payload.is_empty() {
        println!("No payload recovered");
        return Ok(());
    }

    println!("Recovered {} bytes, {} bits corrected", payload.len(), corrected_bits);
    match output {
        Some(path) => {
            std::fs::write(path, &payload)?;
            println!("Wrote {}", path.display());
        }
        None => {
            println!("{}", String::from_utf8_lossy(&payload));
        }
    }
    Ok(())
}
