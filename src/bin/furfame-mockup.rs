use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use url::Url;

use furfame_mockup::{
    BreedMatch, CompositedMockup, Compositor, CompositorOpts, ProductKind, Species,
};

#[derive(Parser, Debug)]
#[command(name = "furfame-mockup", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one photo onto one product and write the PNG.
    Mockup(MockupArgs),
    /// Composite one photo onto several products in parallel.
    Batch(BatchArgs),
    /// Print every product template as JSON.
    Templates,
    /// Check a pet breed name against the known breeds.
    Breed(BreedArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Photo URL (http, https, file, data) or a local file path.
    #[arg(long)]
    photo: String,

    /// Same-origin relay used for the single retry (`<relay>?url=<photo>`).
    /// Falls back to FURFAME_RELAY_URL.
    #[arg(long)]
    relay: Option<Url>,
}

#[derive(Parser, Debug)]
struct MockupArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Product kind: mug, canvas or blanket.
    #[arg(long)]
    product: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also print the mockup as a `data:image/png;base64,...` URL on stdout.
    #[arg(long)]
    print_data_url: bool,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Directory receiving one `<product>.png` per product.
    #[arg(long)]
    out_dir: PathBuf,

    /// Comma-separated product kinds.
    #[arg(long, value_delimiter = ',', default_value = "mug,canvas,blanket")]
    products: Vec<ProductKind>,

    /// Worker threads (defaults to FURFAME_THREADS, then one per core).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct BreedArgs {
    /// dog or cat.
    #[arg(long)]
    species: Species,

    /// Breed name as typed by the customer.
    name: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "furfame_mockup=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Mockup(args) => cmd_mockup(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Templates => cmd_templates(),
        Command::Breed(args) => cmd_breed(args),
    }
}

fn make_compositor(source: &SourceArgs, threads: Option<usize>) -> anyhow::Result<Compositor> {
    let mut opts = CompositorOpts::from_env().context("read compositor options from env")?;
    if let Some(relay) = &source.relay {
        opts.relay_url = Some(relay.clone());
    }
    if threads.is_some() {
        opts.threads = threads;
    }
    Ok(Compositor::new(opts)?)
}

/// Existing local paths become `file://` URLs; everything else is passed through.
fn photo_reference(photo: &str) -> anyhow::Result<String> {
    let path = Path::new(photo);
    if !path.exists() {
        return Ok(photo.to_string());
    }
    let abs = path
        .canonicalize()
        .with_context(|| format!("resolve photo path '{}'", path.display()))?;
    let url = Url::from_file_path(&abs)
        .map_err(|_| anyhow::anyhow!("cannot express '{}' as a file url", abs.display()))?;
    Ok(url.to_string())
}

fn cmd_mockup(args: MockupArgs) -> anyhow::Result<()> {
    let compositor = make_compositor(&args.source, None)?;
    let photo = photo_reference(&args.source.photo)?;
    let mockup = compositor
        .composite(&photo, &args.product)
        .with_context(|| format!("composite '{}' mockup", args.product))?;

    write_png(&args.out, &mockup)?;
    if args.print_data_url {
        println!("{}", mockup.data_url());
    }
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    anyhow::ensure!(!args.products.is_empty(), "no products requested");
    let compositor = make_compositor(&args.source, args.threads)?;
    let photo = photo_reference(&args.source.photo)?;

    let mockups = compositor
        .composite_kinds(&photo, &args.products)
        .context("composite batch")?;
    for mockup in &mockups {
        let out = args.out_dir.join(format!("{}.png", mockup.kind));
        write_png(&out, mockup)?;
    }
    Ok(())
}

fn cmd_templates() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&furfame_mockup::all_templates())
        .context("serialize templates")?;
    println!("{json}");
    Ok(())
}

fn cmd_breed(args: BreedArgs) -> anyhow::Result<()> {
    match furfame_mockup::validate_breed(&args.name, args.species) {
        BreedMatch::Exact { name } => println!("{name}"),
        BreedMatch::Suggestion { name, distance } => {
            println!("did you mean '{name}'? (distance {distance})");
        }
        BreedMatch::Unknown => {
            anyhow::bail!("unknown {} breed '{}'", args.species, args.name);
        }
    }
    Ok(())
}

fn write_png(out: &Path, mockup: &CompositedMockup) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, &mockup.png).with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, sha256 {})",
        out.display(),
        mockup.width,
        mockup.height,
        sha256_hex(&mockup.png)
    );
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
