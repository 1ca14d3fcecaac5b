use anyhow::Result;
use clap::{Parser, Subcommand};
use shared::{
    domain::{Product, SortKey},
    protocol::{CatalogueView, ListingStatus},
};
use storefront_core::{
    load_settings, open_product_detail, CatalogueSession, ProductDetail, ProductPage,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Browse the product catalogue from the terminal")]
struct Cli {
    /// Site root to fetch `data/products.json` from (overrides settings).
    #[arg(long)]
    dataset_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List products, optionally filtered, searched and sorted.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "featured")]
        sort: SortKey,
        /// Number of pages to show ("load more" presses plus one).
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Listing URL query to seed the category from, e.g. `?cat=Wallets`.
        #[arg(long, conflicts_with = "category")]
        query: Option<String>,
    },
    /// Show a product with its gallery and related items.
    Show {
        slug: String,
        /// Gallery steps to take before printing; negative moves backwards.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        step: i32,
    },
    /// List the distinct categories.
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if cli.dataset_url.is_some() {
        settings.dataset_url = cli.dataset_url;
    }
    let catalog = settings.build_catalog()?;

    match cli.command {
        Command::List {
            category,
            search,
            sort,
            pages,
            query,
        } => {
            let mut session = match query {
                Some(query) => CatalogueSession::from_query(&query, settings.page_size),
                None => CatalogueSession::new(settings.page_size),
            };
            if category.is_some() {
                session.set_category(category);
            }
            session.set_search(&search);
            session.set_sort(sort);
            let mut view = session.attach(catalog.load().await);
            for _ in 1..pages {
                view = session.next_page();
            }
            info!(source = ?catalog.load_source(), "catalogue ready");
            print_listing(&view);
        }
        Command::Show { slug, step } => {
            match open_product_detail(&catalog, &slug, settings.related_limit).await {
                ProductDetail::Found(mut page) => {
                    for _ in 0..step.unsigned_abs() {
                        if step > 0 {
                            page.gallery.next();
                        } else {
                            page.gallery.previous();
                        }
                    }
                    print_product(&page, &settings.site_name);
                }
                ProductDetail::NotFound => {
                    println!("Product not found: {slug}");
                }
            }
        }
        Command::Categories => {
            for category in catalog.get_categories().await {
                println!("{category}");
            }
        }
    }

    Ok(())
}

fn print_listing(view: &CatalogueView) {
    let chips: Vec<String> = view
        .chips
        .iter()
        .map(|chip| {
            if chip.active {
                format!("[{}]", chip.label)
            } else {
                chip.label.clone()
            }
        })
        .collect();
    println!("{}", chips.join("  "));

    match view.status {
        ListingStatus::NotLoaded => println!("Catalogue not loaded."),
        ListingStatus::Empty => {
            println!("No products found. Try adjusting your filters or search term.")
        }
        ListingStatus::Results => {
            println!("{} (sorted by {})", view.count_label(), view.sort_key);
            for product in &view.visible {
                print_card(product);
            }
            if view.has_more {
                println!("... load more ({} shown)", view.visible.len());
            }
        }
    }
}

fn print_card(product: &Product) {
    let badge = if product.featured { " [Featured]" } else { "" };
    let image = product.main_image().unwrap_or("(no image)");
    println!(
        "  {:<45} {:<12} {}{badge}  ({})  {image}",
        product.name, product.category, product.price_label, product.slug
    );
}

fn print_product(page: &ProductPage, site_name: &str) {
    let product = &page.product;
    println!("{}", page.page_title(site_name));
    println!("{} / {}", product.category, product.price_label);
    if let Some(description) = &product.description {
        println!("{description}");
    }
    if let Some(material) = &product.material {
        println!("Material: {material}");
    }
    if let Some(sku) = &product.sku {
        println!("SKU: {sku}");
    }
    println!("Availability: {}", page.availability());

    match page.gallery.current() {
        Some(image) => println!("Image: {image}"),
        None => println!("Image: (none)"),
    }
    for thumb in page.gallery.thumbnails() {
        let marker = if thumb.active { '*' } else { ' ' };
        println!(" {marker} {}: {}", thumb.index + 1, thumb.image);
    }

    if !page.related.is_empty() {
        println!("You may also like:");
        for related in &page.related {
            print_card(related);
        }
    }
}
