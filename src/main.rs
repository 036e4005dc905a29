use std::sync::Arc;

use anyhow::bail;
use catalog::{
    client::CatalogClient,
    pagination::Pagination,
    render::{render_detail, render_list, render_pagination, render_state},
    views::{ItemDetailView, ItemListView, Route, ViewState},
};
use clap::{Parser, Subcommand};
use store::models::{ListQuery, NewItem};
use tokio::signal::ctrl_c;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Terminal width used to size the pagination window
    #[arg(long, default_value_t = 100)]
    width: u16,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one page of items
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        q: String,
    },

    /// Show a single item
    Show { id: i64 },

    /// Add an item
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        price: f64,

        #[arg(long)]
        img: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let client = Arc::new(CatalogClient::new());

    match args.command {
        Command::List { page, limit, q } => {
            if page == 0 || limit == 0 {
                bail!("page and limit start at 1");
            }

            let mut view = ItemListView::mount(client, ListQuery { page, limit, q });

            let state = tokio::select! {
                state = view.settled() => Some(state),
                _ = ctrl_c() => None,
            };

            match state {
                Some(state) => {
                    print!(
                        "{}",
                        render_state(&state, &view.recovery(), |page| render_list(page, args.width))
                    );
                    if let ViewState::Ready(page) = &state {
                        println!("\n{}", render_pagination(&Pagination::new(page, args.width)));
                    }
                }
                None => view.unmount().await,
            }
        }
        Command::Show { id } => {
            let back = Route::List(ListQuery::default());
            let mut view = ItemDetailView::mount(client, id, back);

            let state = tokio::select! {
                state = view.settled() => Some(state),
                _ = ctrl_c() => None,
            };

            match state {
                Some(state) => print!("{}", render_state(&state, &view.recovery(), render_detail)),
                None => view.unmount().await,
            }
        }
        Command::Add {
            name,
            category,
            price,
            img,
        } => {
            let item = client
                .create(&NewItem {
                    name,
                    category,
                    price,
                    img,
                })
                .await?;

            print!("{}", render_detail(&item));
        }
    }

    Ok(())
}
