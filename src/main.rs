//! Emberworks - Entry Point
//!
//! Stands in for the host game loop: builds a primitive alloy smelter,
//! loads the fuel and recipe data, and ticks the machine from a small
//! command prompt.

use emberworks::conduit::facade;
use emberworks::core::config::{self, MachinesConfig};
use emberworks::core::error::{EmberError, Result};
use emberworks::item::fuel::FuelRegistry;
use emberworks::item::{ItemId, ItemStack};
use emberworks::machine::smelter::{PrimitiveSmelter, FUEL_SLOT, INPUT_SLOTS, OUTPUT_SLOT};
use emberworks::machine::MachineEvent;
use emberworks::recipe::smelting::SmeltingCatalog;

use std::io::{self, Write};
use std::path::Path;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("emberworks=debug")
        .init();

    tracing::info!("Emberworks starting...");

    let cfg = MachinesConfig::default();
    cfg.validate().map_err(EmberError::InvalidConfig)?;
    facade::init_facades_visible(cfg.facades_visible_default);
    let _ = config::set_config(cfg);

    let fuels = load_fuels();
    let recipes = load_recipes();

    let mut smelter = PrimitiveSmelter::new();
    let mut current_tick: u64 = 0;

    // Display welcome message
    println!("\n=== EMBERWORKS ===");
    println!("Primitive alloy smelter test bench");
    println!();
    println!("Commands:");
    println!("  tick / t             - Advance simulation by one tick");
    println!("  run <n>              - Run n simulation ticks");
    println!("  fuel <item> [n]      - Put items into the fuel slot");
    println!("  input <1-3> <item> [n] - Put items into an input slot");
    println!("  take                 - Empty the output slot");
    println!("  status / s           - Show machine status");
    println!("  recipes              - List smelting recipes");
    println!("  quit / q             - Exit");
    println!();

    // Main driver loop
    loop {
        display_status(&smelter, current_tick);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            current_tick += 1;
            report_events(&smelter.tick(&fuels, &recipes), current_tick);
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            if let Ok(n) = rest.trim().parse::<u32>() {
                println!("Running {} ticks...", n);
                for _ in 0..n {
                    current_tick += 1;
                    report_events(&smelter.tick(&fuels, &recipes), current_tick);
                }
                println!("Completed {} ticks. Now at tick {}.", n, current_tick);
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("fuel ") {
            match parse_item_count(rest) {
                Some((item, count)) => {
                    smelter.set_slot(FUEL_SLOT, ItemStack::new(item.clone(), count));
                    println!("Fuel slot: {} x{}", item, count);
                }
                None => println!("Usage: fuel <item> [count]"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("input ") {
            let mut parts = rest.split_whitespace();
            let slot = parts.next().and_then(|s| s.parse::<usize>().ok());
            let remainder = parts.collect::<Vec<_>>().join(" ");
            match (slot, parse_item_count(&remainder)) {
                (Some(slot @ 1..=3), Some((item, count))) => {
                    smelter.set_slot(slot, ItemStack::new(item.clone(), count));
                    println!("Input slot {}: {} x{}", slot, item, count);
                }
                _ => println!("Usage: input <1-3> <item> [count]"),
            }
            continue;
        }

        if input == "take" {
            let taken = smelter.take_output();
            if taken.is_empty() {
                println!("Output slot is empty.");
            } else {
                println!("Took {} x{}", taken.item(), taken.count());
            }
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&smelter);
            continue;
        }

        if input == "recipes" {
            for recipe in recipes.all() {
                println!(
                    "  {} ({} energy) -> {} x{}",
                    recipe.name, recipe.energy_cost, recipe.output, recipe.output_count
                );
            }
            continue;
        }

        println!("Unknown command. Available: tick, run <n>, fuel, input, take, status, recipes, quit");
    }

    println!("\nGoodbye! {} ticks elapsed.", current_tick);
    Ok(())
}

/// Load the fuel registry from data/, falling back to the built-in set
fn load_fuels() -> FuelRegistry {
    let path = Path::new("data/fuels.toml");
    match FuelRegistry::load_from_toml(path) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::warn!("could not load {}: {} - using built-in fuels", path.display(), e);
            FuelRegistry::with_defaults()
        }
    }
}

/// Load the smelting catalog from data/, falling back to the built-in set
fn load_recipes() -> SmeltingCatalog {
    let path = Path::new("data/smelting.toml");
    match SmeltingCatalog::load_from_toml(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!("could not load {}: {} - using built-in recipes", path.display(), e);
            SmeltingCatalog::with_defaults()
        }
    }
}

fn parse_item_count(input: &str) -> Option<(ItemId, u32)> {
    let mut parts = input.split_whitespace();
    let item = parts.next()?;
    let count = match parts.next() {
        Some(count) => count.parse::<u32>().ok()?,
        None => 1,
    };
    Some((ItemId::new(item), count))
}

fn report_events(events: &[MachineEvent], tick: u64) {
    for event in events {
        match event {
            MachineEvent::BurnStarted { fuel, duration } => {
                println!("[{}] Burn started: {} for {} ticks", tick, fuel, duration);
            }
            MachineEvent::BurnEnded => println!("[{}] Burn ended", tick),
            MachineEvent::TaskAccepted { recipe } => {
                println!("[{}] Task accepted: {}", tick, recipe);
            }
            MachineEvent::SmeltCompleted { recipe, output } => {
                println!("[{}] Smelt complete: {} -> {}", tick, recipe, output);
            }
        }
    }
}

/// Display a brief status summary
fn display_status(smelter: &PrimitiveSmelter, tick: u64) {
    println!();
    println!(
        "--- Tick {} | {} | burn {:.0}% ---",
        tick,
        if smelter.is_active() { "ACTIVE" } else { "idle" },
        smelter.burn_progress() * 100.0
    );
}

/// Display every slot and the burn/task state
fn display_detailed_status(smelter: &PrimitiveSmelter) {
    println!();
    println!("Burning: {} ({:.0}%)", smelter.is_burning(), smelter.burn_progress() * 100.0);
    println!("Energy-equivalent output: {}", smelter.burn_to_energy());

    let describe = |stack: &ItemStack| {
        if stack.is_empty() {
            "empty".to_string()
        } else {
            format!("{} x{}", stack.item(), stack.count())
        }
    };

    println!("  Fuel:   {}", describe(smelter.slot(FUEL_SLOT)));
    for slot in INPUT_SLOTS {
        println!("  In {}:   {}", slot, describe(smelter.slot(slot)));
    }
    println!("  Out:    {}", describe(smelter.slot(OUTPUT_SLOT)));

    match smelter.task() {
        Some(task) => println!(
            "  Task:   {} ({:.0}%)",
            task.recipe_id(),
            task.progress() * 100.0
        ),
        None => println!("  Task:   none"),
    }
}
