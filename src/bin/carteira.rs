use std::{error::Error, process::exit};

use clap::{Parser, Subcommand};
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use tracing_subscriber::EnvFilter;

use carteira::{
    Category, PaymentMethod, Transaction, TransactionPayload,
    money::{MoneyFormat, TransactionType},
    rest_client::TransactionRestClient,
    store::TransactionStore,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// A command-line client for the Carteira API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The base URL of the API.
    #[arg(long, env = "CARTEIRA_API_URL", default_value = "http://127.0.0.1:3000/api")]
    base_url: String,

    /// The BCP-47 locale used to show amounts.
    #[arg(long, default_value = "pt-BR")]
    locale: String,

    /// The ISO 4217 code of the currency amounts are entered in.
    #[arg(long, default_value = "BRL")]
    currency: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List transactions, newest first.
    List {
        /// Only show transactions in this category, e.g. "food".
        #[arg(long)]
        category: Option<Category>,

        /// Only show transactions whose title contains this text.
        #[arg(long)]
        title: Option<String>,

        #[arg(long, default_value_t = 10)]
        limit: u32,

        #[arg(long, default_value_t = 0)]
        skip: u32,
    },
    /// Register a transaction.
    Add {
        #[arg(long)]
        title: String,

        /// The amount as typed into a currency field: only the digits count and the last two
        /// are cents, so "12,50", "1250" and "R$ 12,50" are all 12.50.
        #[arg(long)]
        amount: String,

        /// "income" or "expense".
        #[arg(long = "type", default_value = "expense")]
        transaction_type: TransactionType,

        #[arg(long, default_value = "other")]
        category: Category,

        #[arg(long, default_value = "cash")]
        payment_method: PaymentMethod,

        /// The date in the format YYYY-MM-DD, defaults to today.
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a transaction.
    Delete {
        /// The ID of the transaction.
        id: i64,
    },
    /// Format an amount in major units without contacting the server.
    Format {
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Prefix the amount with the sign of this transaction type.
        #[arg(long = "type")]
        transaction_type: Option<TransactionType>,

        /// Leave out the currency symbol.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let money_format = match MoneyFormat::new(&args.currency, &args.locale) {
        Ok(money_format) => money_format,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            exit(1);
        }
    };

    match args.command {
        Command::Format {
            amount,
            transaction_type,
            plain,
        } => {
            let text = match transaction_type {
                Some(transaction_type) => {
                    money_format.format_signed(amount, transaction_type, !plain).text
                }
                None => money_format.format_amount(amount, !plain),
            };
            println!("{text}");
        }
        Command::List {
            category,
            title,
            limit,
            skip,
        } => {
            let client = TransactionRestClient::new(args.base_url)?;
            let Some(page) = client.list(category, title.as_deref(), limit, skip).await else {
                eprintln!("Could not get transactions from {}", client.rest_client().base_url());
                exit(1);
            };

            if page.data.is_empty() {
                println!("Nenhuma transação encontrada");
            }
            for transaction in &page.data {
                println!("{}", describe(transaction, &money_format));
            }
            println!(
                "{} de {} transações",
                page.data.len(),
                page.pagination.count
            );
        }
        Command::Add {
            title,
            amount,
            transaction_type,
            category,
            payment_method,
            date,
            description,
        } => {
            let date = match date {
                Some(date) => Date::parse(&date, DATE_FORMAT)?,
                None => OffsetDateTime::now_local()
                    .unwrap_or_else(|_| OffsetDateTime::now_utc())
                    .date(),
            };
            let payload = TransactionPayload {
                title,
                amount: money_format.parse_input(&amount).amount,
                currency: Some(money_format.currency()),
                transaction_type,
                category,
                payment_method,
                description,
                date,
            };

            let mut store = TransactionStore::new(TransactionRestClient::new(args.base_url)?);
            let transaction = store.save_transaction(&payload).await?;
            println!("Transação cadastrada com sucesso!");
            println!("{}", describe(&transaction, &money_format));
        }
        Command::Delete { id } => {
            let mut store = TransactionStore::new(TransactionRestClient::new(args.base_url)?);
            store.delete_transaction(id).await?;
            println!("Transação excluída com sucesso!");
        }
    }

    Ok(())
}

fn describe(transaction: &Transaction, money_format: &MoneyFormat) -> String {
    let amount = money_format
        .with_currency(transaction.currency)
        .format_signed_minor_units(transaction.amount, transaction.transaction_type, true);

    format!(
        "#{:<4} {:02}/{:02}/{}  {:<30}  {:<15}  {}",
        transaction.id,
        transaction.date.day(),
        u8::from(transaction.date.month()),
        transaction.date.year(),
        transaction.title,
        transaction.category.label(),
        amount.text
    )
}
