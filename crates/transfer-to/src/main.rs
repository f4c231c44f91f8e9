use clap::{Parser, Subcommand};
use eyre::Context as _;
use rust_decimal::Decimal;
use std::str::FromStr as _;
use tracing_subscriber::prelude::*;
use transfer_to::{
    aggregator::RecipientAggregator,
    coin::Coin,
    config::PickerConfig,
    errors::PickerError,
    fiat::FiatAmountFormatter,
    navigation::Selection,
    paths::PickerPaths,
    profile::ProfileFile,
    recipient::Recipient,
    resolver::AddressClassifier,
    store::ConfigStore,
};

mod cli_output;

type Picker = RecipientAggregator<ProfileFile, ProfileFile, AddressClassifier>;

#[derive(Parser, Debug)]
#[command(name = "transfer-to", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the recipients the transfer screen would show, as JSON.
    Recipients {
        /// Name or id of the wallet funds are sent from. Omit to list every recipient.
        #[arg(long)]
        from: Option<String>,

        /// Case-insensitive name filter.
        #[arg(long)]
        search: Option<String>,

        /// Number of "show more" pages to reveal beyond the first.
        #[arg(long, default_value_t = 0)]
        more: usize,
    },

    /// Pick a recipient by name or address and print the amount-view payload.
    Select {
        /// Recipient name (wallet or contact) or contact address.
        recipient: String,

        #[arg(long)]
        from: Option<String>,

        /// Amount in the coin's smallest unit to pre-fill.
        #[arg(long)]
        amount: Option<u64>,

        /// Mark the amount view as opened from a modal.
        #[arg(long, default_value_t = false)]
        modal: bool,
    },

    /// Convert a fiat amount to coin units, e.g. `fiat 10 btc --alternative USD`.
    Fiat {
        amount: String,
        coin: String,

        /// Fiat ISO code; defaults to the configured alternative currency.
        #[arg(long)]
        alternative: Option<String>,
    },

    /// Print resolved paths (useful for debugging).
    Paths,
}

fn init_logging(paths: &PickerPaths) -> tracing_appender::non_blocking::WorkerGuard {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let file_name = paths
        .log_file
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("transfer-to.log.jsonl");
    let file_appender = tracing_appender::rolling::never(&paths.data_dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_filter(env_filter.clone());
    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(file_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

async fn open_picker(
    cfg: &PickerConfig,
    paths: &PickerPaths,
    from: Option<&str>,
) -> eyre::Result<Picker> {
    let profile_path = cfg
        .profile_path
        .clone()
        .unwrap_or_else(|| paths.default_profile_file());
    let profile = ProfileFile::load(&profile_path)?;
    let source = from
        .map(|name| {
            profile
                .find_wallet(name)
                .cloned()
                .ok_or_else(|| PickerError::WalletNotFound(name.to_owned()))
        })
        .transpose()?;

    let mut picker = RecipientAggregator::new(profile.clone(), profile, AddressClassifier)
        .with_page_size(cfg.effective_page_size());
    picker.set_source_wallet(source).await;
    Ok(picker)
}

fn find_recipient(picker: &Picker, needle: &str) -> Option<Recipient> {
    let needle = needle.trim();
    let wallets = Picker::available_coins()
        .iter()
        .flat_map(|&c| picker.wallet_list(c).iter())
        .find(|w| w.name.eq_ignore_ascii_case(needle) || w.wallet_id == needle)
        .cloned()
        .map(Recipient::Wallet);
    wallets.or_else(|| {
        picker
            .contacts()
            .iter()
            .find(|c| c.address == needle || c.name.eq_ignore_ascii_case(needle))
            .cloned()
            .map(Recipient::Contact)
    })
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let paths = PickerPaths::discover()?;
    std::fs::create_dir_all(&paths.data_dir).context("create data dir")?;
    let _log_guard = init_logging(&paths);
    let cfg = ConfigStore::new(&paths).load()?;

    match cli.cmd {
        Command::Recipients { from, search, more } => {
            let mut picker = open_picker(&cfg, &paths, from.as_deref()).await?;
            for _ in 0..more {
                picker.show_more().await;
            }
            if let Some(text) = search {
                picker.set_search(&text).await;
            }
            cli_output::print_json(&picker.snapshot())
        }
        Command::Select {
            recipient,
            from,
            amount,
            modal,
        } => {
            let mut picker = open_picker(&cfg, &paths, from.as_deref())
                .await?
                .with_amount(amount);
            picker.set_use_as_modal(modal);
            let target = find_recipient(&picker, &recipient)
                .ok_or_else(|| PickerError::RecipientNotFound(recipient.clone()))?;

            let mut nav = cli_output::CapturedNavigation::default();
            let mut alerts = cli_output::StderrAlerts;
            match picker.resolve_and_select(&target, &mut nav, &mut alerts).await {
                Selection::Navigated => match nav.request {
                    Some(req) => cli_output::print_json(&req),
                    None => Err(PickerError::NothingSelected.into()),
                },
                Selection::NoAddress | Selection::Failed => Err(PickerError::NothingSelected.into()),
            }
        }
        Command::Fiat {
            amount,
            coin,
            alternative,
        } => {
            let amount = Decimal::from_str(amount.trim()).context("parse fiat amount")?;
            let coin: Coin = coin.parse()?;
            let formatter = FiatAmountFormatter::new(cfg.wallet.clone(), &cfg.rates);
            cli_output::print_line(&formatter.format(amount, coin, alternative.as_deref()))
        }
        Command::Paths => cli_output::print_json(&serde_json::json!({
            "config_dir": paths.config_dir,
            "data_dir": paths.data_dir,
            "config_file": paths.config_file(),
            "profile_file": cfg.profile_path.clone().unwrap_or_else(|| paths.default_profile_file()),
            "log_file": paths.log_file,
        })),
    }
}
