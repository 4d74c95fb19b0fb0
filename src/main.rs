use std::sync::Arc;

use log::{info, warn};
use scryfall_catalog::utilities::config::CONFIG;
use scryfall_catalog::{Card, CardDetails, CatalogViewModel, ImageCache, CATALOG};

fn price_summary(card: &Card) -> String {
    card.prices
        .available()
        .iter()
        .map(|price| format!("{} {}", price.label(), price))
        .collect::<Vec<String>>()
        .join(", ")
}

fn print_grid(cards: &[&Card]) {
    for card in cards {
        println!(
            "{:>5}  {:<28} {:<12} {}",
            card.collector_number.as_str(),
            card.name,
            card.mana_cost,
            price_summary(card)
        );
    }
}

fn print_details(details: &CardDetails) {
    println!();
    println!("{}  {}", details.name, details.mana_cost);
    println!("{}", details.type_line);
    println!("{}", details.oracle_text);
    println!("Collector number: {}", details.collector_number);
    println!("Artwork: {}", details.hero_image_uri);
    for price in &details.prices {
        println!("  {:<10} {}", price.label, price.value);
    }
    for line in &details.legalities {
        println!("  {:<12} {}", line.format_label(), line.legality);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("Starting");

    let mut view_model = CatalogViewModel::new(Arc::clone(&CATALOG));
    view_model.set_search_text(&CONFIG.search);
    view_model.set_sort_mode(CONFIG.sort_mode, CONFIG.ascending);

    let thumbnails: Vec<String> = {
        let cards = view_model.sorted_filtered_cards();
        info!(
            "Showing {} of {} cards",
            cards.len(),
            view_model.catalog().len()
        );
        print_grid(&cards);
        cards
            .iter()
            .map(|card| card.thumbnail_uri().to_string())
            .collect()
    };

    if let Some(name) = &CONFIG.detail {
        let selected = view_model
            .catalog()
            .find_by_name(name)
            .first()
            .map(|card| card.id().to_string());
        match selected {
            Some(id) => {
                if view_model.select_card(&id) {
                    if let Some(details) = view_model.selected_details() {
                        print_details(&details);
                    }
                } else {
                    warn!("Card '{}' is not in the catalog", id);
                }
            }
            None => warn!("No card named '{}' in the catalog", name),
        }
    }

    if CONFIG.prefetch {
        let client = reqwest::Client::builder()
            .timeout(CONFIG.image_fetch_timeout)
            .build()?;
        let cache = ImageCache::with_http(client, CONFIG.image_fetch_timeout);
        let ready = cache
            .prefetch(&thumbnails, CONFIG.prefetch_concurrency)
            .await;
        println!("{} of {} thumbnails ready", ready, thumbnails.len());
    }

    Ok(())
}
