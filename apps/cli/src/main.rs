use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    BillsApi, BillsListController, CurrentUser, HttpBillStore, Navigator,
    NewBillController, NewBillForm, ReceiptFile, Route, SessionContext, SubmitError,
};
use shared::domain::ExpenseType;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;
mod view;

use config::{load_settings, DEFAULT_CONFIG_PATH};
use terminal::{TerminalModal, TerminalNavigator};

#[derive(Parser, Debug)]
#[command(name = "billed", about = "Submit and review expense bills")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Overrides the signed-in user's email.
    #[arg(long)]
    email: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List bills, most recent first.
    List {
        /// Preview the receipt of the given row (1-based).
        #[arg(long)]
        preview: Option<usize>,
        /// Open the new-bill form after listing.
        #[arg(long)]
        new_bill: bool,
    },
    /// Submit a new bill.
    New {
        #[arg(long = "type")]
        expense_type: ExpenseType,
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "")]
        vat: String,
        #[arg(long, default_value = "")]
        pct: String,
        #[arg(long, default_value = "")]
        commentary: String,
        /// Receipt image (jpg, jpeg or png).
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

struct App {
    store: Arc<dyn BillsApi>,
    session: Arc<SessionContext>,
    navigator: Arc<TerminalNavigator>,
    modal: Arc<TerminalModal>,
}

impl App {
    fn bills_page(&self) -> BillsListController {
        BillsListController::new(
            Some(self.store.clone()),
            self.navigator.clone(),
            self.modal.clone(),
        )
    }

    async fn show_bills(&self, preview: Option<usize>, new_bill: bool) -> Result<()> {
        let mut page = self.bills_page();
        let rows = view::load_bills_page(&mut page, |text| println!("{text}"))
            .await
            .context("could not load bills")?;

        if let Some(index) = preview {
            let row = index
                .checked_sub(1)
                .and_then(|i| rows.get(i))
                .with_context(|| format!("no bill at row {index}"))?;
            match row.eye_icon() {
                Some(icon) => page.handle_click_icon_eye(&icon),
                None => println!("Bill '{}' has no receipt attached", row.bill.name),
            }
        }

        if new_bill {
            page.handle_click_new_bill();
            if self.navigator.current() == Route::NewBill {
                println!("Run `billed new --type <TYPE> --name <NAME> --amount <AMOUNT> --date <YYYY-MM-DD> [--file <RECEIPT>]`");
                println!(
                    "Types: {}",
                    ExpenseType::ALL.map(ExpenseType::label).join(", ")
                );
            }
        }

        Ok(())
    }

    async fn submit(&self, form: NewBillForm, file: Option<PathBuf>) -> Result<()> {
        let mut controller =
            NewBillController::new(self.store.clone(), self.navigator.clone(), self.session.clone());

        if let Some(path) = file {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read receipt '{}'", path.display()))?;
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default()
                .to_string();
            let mime_type = mime_guess::from_path(&path).first_raw().map(str::to_string);
            controller.on_file_selected(vec![ReceiptFile {
                name,
                mime_type,
                bytes,
            }]);
            if let Some(message) = controller.file_error() {
                bail!("{message}");
            }
        }

        match controller.on_submit(&form).await {
            Ok(created) => {
                println!("Bill {} submitted", created.id);
                if self.navigator.current() == Route::Bills {
                    self.show_bills(None, false).await?;
                }
                Ok(())
            }
            Err(SubmitError::Store(err)) => {
                let mut page = self.bills_page();
                page.surface_error(&err);
                println!("{}", view::render_bills_page(&page.state()));
                Err(err).context("bill submission failed")
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    if let Some(email) = args.email {
        settings.email = Some(email);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let api_url = settings.api_base_url()?;
    let Some(email) = settings.email.clone() else {
        bail!("no user email configured; set `email` in {DEFAULT_CONFIG_PATH}, BILLED_EMAIL or --email");
    };

    let session = Arc::new(SessionContext::new());
    session
        .login(CurrentUser {
            user_type: settings.user_type,
            email,
            jwt: settings.jwt.clone(),
        })
        .await;

    let app = App {
        store: Arc::new(HttpBillStore::new(api_url.as_str(), settings.jwt.clone())),
        session: session.clone(),
        navigator: Arc::new(TerminalNavigator::new(Route::Bills)),
        modal: Arc::new(TerminalModal::new(settings.modal_width)),
    };

    let result = match args.command {
        Command::List { preview, new_bill } => app.show_bills(preview, new_bill).await,
        Command::New {
            expense_type,
            name,
            amount,
            date,
            vat,
            pct,
            commentary,
            file,
        } => {
            app.navigator.navigate(Route::NewBill);
            let form = NewBillForm {
                expense_type,
                name,
                amount,
                date,
                vat,
                pct,
                commentary,
            };
            app.submit(form, file).await
        }
    };

    session.logout().await;
    result
}
