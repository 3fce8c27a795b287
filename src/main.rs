use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;
use strum::IntoEnumIterator;
use tokio::runtime::Runtime;

use pair_scope::{
    CATALOG_ACCEPTABLE_AGE_SECONDS, Cli, PairCategory, PairSymbol, SelectorSession, Tier,
    fetch_catalog_data, validate_scan_request, write_catalog_data_async,
};

fn main() -> Result<()> {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Catalog Loading (Blocking)
    let rt = Runtime::new()?;
    let mut session = SelectorSession::new(args.seed.clone());
    load_catalog(&rt, &mut session, &args);

    // D. Interactive prompt
    run_prompt(&rt, &mut session, &args)
}

/// Run one stamped load and deliver the outcome to the session, persisting
/// a fresh payload in the background.
fn load_catalog(rt: &Runtime, session: &mut SelectorSession, args: &Cli) {
    let generation = session.generation();
    match rt.block_on(fetch_catalog_data(CATALOG_ACCEPTABLE_AGE_SECONDS, args)) {
        Ok((payload, signature)) => {
            log::info!("Catalog retrieved using: {}.", signature);

            let cache_payload = payload.clone();
            rt.spawn(async move {
                if let Err(e) = write_catalog_data_async(cache_payload).await {
                    log::error!("Failed to write catalog cache: {}", e);
                }
            });

            session.apply_load(generation, Ok(payload));
        }
        Err(e) => session.apply_load(generation, Err(e)),
    }
}

fn run_prompt(rt: &Runtime, session: &mut SelectorSession, args: &Cli) -> Result<()> {
    print_status(session);
    print_help();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            // Stdin closed: treat like a cancel
            session.dismiss();
            return Ok(());
        };
        let line = line?;
        let (command, rest) = match line.trim().split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" => {}
            "list" => print_listing(session),
            "find" => {
                session.set_filter(rest);
                print_listing(session);
            }
            "pick" => {
                if rest.is_empty() {
                    println!("usage: pick <SYMBOL>");
                } else {
                    pick(session, &rest.to_ascii_uppercase());
                }
            }
            "all" => {
                session.select_all();
                print_status(session);
            }
            "none" => {
                session.clear_all();
                print_status(session);
            }
            "status" => print_status(session),
            "retry" => {
                if session.last_error().is_some() {
                    let _ = session.retry();
                    load_catalog(rt, session, args);
                    print_status(session);
                } else {
                    println!("Nothing to retry.");
                }
            }
            "done" => {
                if confirm(session) {
                    return Ok(());
                }
            }
            "quit" => {
                session.dismiss();
                println!("Selection discarded.");
                return Ok(());
            }
            other => println!("Unknown command: {other}"),
        }
    }
}

fn pick(session: &mut SelectorSession, symbol: &str) {
    let Some(selection) = session.selection() else {
        println!("The selector is not ready yet.");
        return;
    };

    let was_selected = selection.contains(symbol);
    let blocked = !was_selected && !selection.can_add_more();
    session.toggle(symbol);

    if blocked {
        if let Some(max_pairs) = session.selection().and_then(|s| s.max_pairs()) {
            println!("Plan limit reached ({max_pairs} pairs).");
            if session.tier() == Some(Tier::Starter) {
                println!(
                    "Upgrade to Plus ({} pairs) or Pro (unlimited) to scan more opportunities.",
                    Tier::Plus.max_pairs().unwrap_or_default()
                );
            }
        }
    } else {
        print_status(session);
    }
}

fn confirm(session: &mut SelectorSession) -> bool {
    if !session.can_confirm() {
        println!("Pick at least one pair before confirming.");
        return false;
    }

    // Belt-and-braces copy of the backend's own check before we ship the
    // request off.
    if let (Some(selection), Some(tier), Some(catalog)) =
        (session.selection(), session.tier(), session.catalog())
    {
        if let Err(e) = validate_scan_request(selection.selected(), tier, catalog) {
            println!("{e}");
            return false;
        }
    }

    let picks = std::mem::replace(session, SelectorSession::new(Vec::new()))
        .confirm()
        .unwrap_or_default();
    println!("Confirmed {} pair(s):", picks.len());
    for symbol in picks {
        println!("  {}", PairSymbol::display_name(&symbol));
    }
    true
}

fn print_status(session: &SelectorSession) {
    if session.is_loading() {
        println!("Loading available pairs...");
        return;
    }
    if let Some(err) = session.last_error() {
        println!("{err}");
        println!("Type `retry` to try again.");
        return;
    }

    let (Some(selection), Some(tier), Some(catalog)) =
        (session.selection(), session.tier(), session.catalog())
    else {
        return;
    };

    let cap = selection
        .max_pairs()
        .map_or_else(|| "∞".to_string(), |max| max.to_string());
    let select_all_hint = if selection.is_at_select_all_limit(catalog.len()) {
        " (select-all exhausted)"
    } else {
        ""
    };
    println!(
        "{} plan: {} of {} pairs selected{}",
        tier,
        selection.len(),
        cap,
        select_all_hint
    );
}

fn print_listing(session: &SelectorSession) {
    let visible = session.visible_pairs();
    if visible.is_empty() {
        if session.is_ready() {
            println!("No pairs match \"{}\".", session.filter_term());
        } else {
            println!("The selector is not ready yet.");
        }
        return;
    }

    let Some(selection) = session.selection() else {
        return;
    };

    for category in PairCategory::iter() {
        let in_category: Vec<&String> = visible
            .iter()
            .copied()
            .filter(|symbol| PairCategory::of(symbol) == category)
            .collect();
        if in_category.is_empty() {
            continue;
        }

        println!("{category} Pairs");
        for symbol in in_category {
            let marker = if selection.contains(symbol) {
                "[x]"
            } else if selection.can_add_more() {
                "[ ]"
            } else {
                "[-]" // locked behind the plan cap
            };
            println!("  {marker} {:<10} {}", symbol, PairSymbol::display_name(symbol));
        }
    }
    print_status(session);
}

fn print_help() {
    println!("Commands:");
    println!("  list            show pairs matching the current search");
    println!("  find <term>     search pairs (empty term clears)");
    println!("  pick <SYMBOL>   toggle one pair");
    println!("  all / none      select up to the plan limit / clear");
    println!("  status          show plan and selection count");
    println!("  retry           re-fetch the catalog after a failure");
    println!("  done            confirm the selection");
    println!("  quit            discard and exit");
}
