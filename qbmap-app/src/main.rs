use anyhow::Context;
use clap::Parser;
use qbmap::{
    data::{markup::MarkupElement, notification},
    Level, Notification, NotifyMap, ReqwestTransport, Tournament, WidgetConfig,
};
use std::path::PathBuf;

/// Builds the tournament notification map against live feeds and prints a
/// summary of every overlay and marker it produced.
#[derive(Debug, Parser)]
#[command(name = "qbmap-app", version)]
struct Args {
    /// Widget configuration (JSON); defaults match the deployed site
    #[arg(short, long, env = "QBMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Markup elements to scan (JSON array of {classes, dataset})
    #[arg(short, long)]
    markup: Option<PathBuf>,

    /// Site origin feed paths are resolved against
    #[arg(short, long, env = "QBMAP_ORIGIN")]
    origin: Option<String>,

    /// Level codes whose legend checkbox starts unchecked
    #[arg(long, value_delimiter = ',')]
    hide: Vec<String>,

    /// Seed for marker jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Notifications to match against the feed (JSON array)
    #[arg(short, long)]
    notifications: Option<PathBuf>,

    /// Date matching treats as today (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    today: Option<chrono::NaiveDate>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => WidgetConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => WidgetConfig::default(),
    };
    if let Some(origin) = args.origin {
        config.origin = Some(origin);
    }
    if config.origin.is_none() {
        anyhow::bail!("no origin configured; pass --origin or set it in the config file");
    }

    let markup: Vec<MarkupElement> = match &args.markup {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading markup {}", path.display()))?;
            serde_json::from_str(&json).context("parsing markup elements")?
        }
        None => Vec::new(),
    };

    let mut map = NotifyMap::headless(config);
    if let Some(seed) = args.seed {
        map = map.with_seed(seed);
    }
    let mut errors = map.error_channel();
    let fetcher = map.fetcher(ReqwestTransport::new());

    let report = map.initialize(&markup, &fetcher).await;

    for name in &args.hide {
        if map.on_checkbox(name, false).is_none() {
            eprintln!("warning: {:?} is not a level code", name);
        }
    }

    println!("Boundaries: {}", report.boundaries);
    for polygon in map.surface().polygons() {
        match polygon.bounds() {
            Some(b) => println!(
                "   {} rings, {} vertices, SW({:.4}, {:.4}) NE({:.4}, {:.4})",
                polygon.paths.len(),
                polygon.vertex_count(),
                b.south_west.lat,
                b.south_west.lng,
                b.north_east.lat,
                b.north_east.lng
            ),
            None => println!("   empty polygon"),
        }
    }

    println!("Circles: {}", report.circles);
    for circle in map.surface().circles() {
        println!(
            "   ({:.4}, {:.4}) r={:.1}m",
            circle.center.lat, circle.center.lng, circle.radius_m
        );
    }

    println!("Markers: {}", report.markers);
    for level in Level::ALL {
        let bucket = map.registry().bucket(level);
        let shown = if map.controls().is_checked(level) {
            "shown"
        } else {
            "hidden"
        };
        println!("   {:<13} {:>4} ({})", level.label(), bucket.len(), shown);
    }

    if report.dropped_fetches > 0 {
        println!("Dropped fetches: {}", report.dropped_fetches);
        while let Ok(Some(e)) = errors.try_next() {
            println!("   {}", e);
        }
    }

    if let Some(path) = &args.notifications {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading notifications {}", path.display()))?;
        let notes: Vec<Notification> =
            serde_json::from_str(&json).context("parsing notifications")?;
        let feed: Vec<Tournament> = fetcher
            .fetch(&map.config().tournament_feed)
            .await
            .context("fetching tournament feed")?;
        let today = args
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        println!("Notifications (as of {}):", today);
        for note in &notes {
            println!("   {}", note.describe());
        }
        let matched = notification::matching(&notes, &feed, today);
        println!("Matches: {}", matched.len());
        for t in matched {
            println!("   {} {} ({})", t.date, t.name, t.level);
        }
    }

    Ok(())
}
