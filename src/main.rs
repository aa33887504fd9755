use clap::{Parser, Subcommand};
use order_payments::application::webhook::WebhookNotification;
use order_payments::config::AppConfig;
use order_payments::domain::payment::PaymentStatus;
use order_payments::error::Result;
use order_payments::interfaces::csv::notification_reader::NotificationReader;
use order_payments::interfaces::csv::payment_writer::PaymentWriter;
use order_payments::interfaces::requests::{CreatePaymentRequest, Validate};
use order_payments::startup::{self, Services};
use order_payments::telemetry;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a payment for an order and submit it to the provider
    Create {
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        customer_id: Option<String>,
    },
    /// Look up the payment recorded for an order
    Find {
        #[arg(long)]
        order_id: String,
    },
    /// Apply a single provider status notification
    Webhook {
        #[arg(long)]
        payment_id: String,
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        status: PaymentStatus,
        #[arg(long)]
        amount: Decimal,
    },
    /// Apply every notification from a CSV file (id,pedido_id,status,valor)
    Replay {
        /// Input notifications CSV file
        input: PathBuf,
    },
    /// Print every stored payment as CSV
    List,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    telemetry::init_tracing(cli.config.log_format);

    if let Err(e) = run(cli).await {
        let category = e.category();
        error!(
            ?category,
            status_code = category.status_code(),
            "Command failed"
        );
        return Err(e.into());
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let services = startup::build(&cli.config)?;

    match cli.command {
        Command::Create {
            order_id,
            amount,
            customer_id,
        } => {
            let request = CreatePaymentRequest {
                order_id,
                amount,
                customer_id,
            };
            request.validate()?;
            let payment = services
                .payments
                .create(&request.order_id, request.amount()?, request.customer_id)
                .await?;
            print_json(&payment)?;
        }
        Command::Find { order_id } => {
            let payment = services.payments.find_by_order_id(&order_id).await?;
            print_json(&payment)?;
        }
        Command::Webhook {
            payment_id,
            order_id,
            status,
            amount,
        } => {
            let notification = WebhookNotification {
                payment_id,
                order_id,
                status,
                amount,
            };
            notification.validate()?;
            let ack = services.webhooks.handle(notification).await?;
            print_json(&ack)?;
        }
        Command::Replay { input } => replay(&services, input).await?,
        Command::List => {
            let mut payments = services.payments.list().await?;
            payments.sort_by_key(|p| p.created_at());

            let stdout = io::stdout();
            let mut writer = PaymentWriter::new(stdout.lock());
            writer.write_payments(&payments)?;
        }
    }

    Ok(())
}

/// Applies notifications one after another. A bad row is logged and skipped.
async fn replay(services: &Services, input: PathBuf) -> Result<()> {
    let file = File::open(input)?;
    let reader = NotificationReader::new(file);

    let (mut applied, mut failed) = (0usize, 0usize);
    for notification in reader.notifications() {
        let result = match notification {
            Ok(n) => match n.validate() {
                Ok(()) => services.webhooks.handle(n).await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        match result {
            Ok(ack) => {
                applied += 1;
                println!("{}", serde_json::to_string(&ack)?);
            }
            Err(e) => {
                failed += 1;
                error!(error = %e, "Error processing notification");
            }
        }
    }

    info!(applied, failed, "Replay finished");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
