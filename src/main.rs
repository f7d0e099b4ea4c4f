use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use recetario::config::load_config;
use recetario::slug;
use recetario::store::{MemoryStore, RecipeStore};
use recetario::{AppConfig, Locale, Recipe, RecipeError, RecipeService, SourceMode};
use std::sync::Arc;

/// Find and show budget recipes in Spanish or English
#[derive(Parser, Debug)]
#[command(name = "recetario")]
#[command(version)]
struct Cli {
    /// Generative backend to use (openai, anthropic, google, ollama, catalog)
    #[arg(long, global = true, env = "RECETARIO_PROVIDER")]
    provider: Option<String>,

    /// Recipe source: generated or stored
    #[arg(long, global = true, default_value = "generated")]
    mode: SourceMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for recipes
    Search {
        /// What to cook
        query: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show one recipe by its path segment, e.g. lemon-garlic-chicken-42
    Show {
        slug: String,

        /// Print the steps as one read-aloud paragraph
        #[arg(long, default_value_t = false)]
        narrate: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the featured recipes
    Featured {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Display language (es or en)
    #[arg(long, default_value = "es")]
    locale: Locale,

    /// Print recipes as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config().map_err(RecipeError::from)?;
    debug!("Default provider: {}", config.default_provider);

    let store = open_store(&config).await?;
    let mut builder = RecipeService::builder()
        .config(config)
        .mode(cli.mode)
        .store(store);
    if let Some(name) = cli.provider {
        builder = builder.provider_name(name);
    }
    let service = builder.build()?;
    info!("Serving recipes from the {} source", service.source_name());

    match cli.command {
        Command::Search { query, output } => {
            let recipes = service.search(&query).await?;
            let recipes = service.localize(recipes, output.locale).await;
            print_recipes(&recipes, &output)?;
        }
        Command::Show {
            slug,
            narrate,
            output,
        } => match service.get_by_slug(&slug, output.locale).await? {
            Some(recipe) if narrate => println!("{}", recipe.narration(output.locale)),
            Some(recipe) => print_recipe(&recipe, &output)?,
            None => {
                eprintln!("Recipe not found: {}", slug);
                std::process::exit(1);
            }
        },
        Command::Featured { output } => {
            let recipes = service.get_featured().await?;
            let recipes = service.localize(recipes, output.locale).await;
            print_recipes(&recipes, &output)?;
        }
    }

    Ok(())
}

async fn open_store(config: &AppConfig) -> Result<Arc<dyn RecipeStore>, Box<dyn std::error::Error>> {
    let store = match &config.store.snapshot_path {
        Some(path) => MemoryStore::open(path).await?,
        None => MemoryStore::new(),
    };
    Ok(Arc::new(store))
}

fn print_recipes(recipes: &[Recipe], output: &OutputArgs) -> Result<(), Box<dyn std::error::Error>> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(recipes)?);
        return Ok(());
    }
    if recipes.is_empty() {
        println!("No recipes found.");
    }
    for recipe in recipes {
        print_card(recipe, output.locale);
    }
    Ok(())
}

fn print_card(recipe: &Recipe, locale: Locale) {
    println!("{}", recipe.title);
    println!(
        "  {} + {} | {} | {}",
        recipe.prep_time,
        recipe.cook_time,
        recipe.servings,
        recipe.cost_badge().unwrap_or("-")
    );
    if !recipe.card_tags().is_empty() {
        println!("  #{}", recipe.card_tags().join(" #"));
    }
    println!("  {}", slug::recipe_path(locale, recipe));
}

fn print_recipe(recipe: &Recipe, output: &OutputArgs) -> Result<(), Box<dyn std::error::Error>> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(recipe)?);
        return Ok(());
    }

    print_card(recipe, output.locale);
    if !recipe.description.is_empty() {
        println!("\n{}", recipe.description);
    }
    println!();
    for ingredient in &recipe.ingredients {
        println!("  - {} {}", ingredient.quantity, ingredient.item);
    }
    println!();
    for (number, step) in recipe.numbered_steps() {
        println!("  {}. {}", number, step.description);
    }
    if let Some(nutrition) = &recipe.nutrition {
        let facts: Vec<String> = [
            ("kcal", &nutrition.calories),
            ("protein", &nutrition.protein),
            ("carbs", &nutrition.carbs),
            ("fat", &nutrition.fat),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| format!("{} {}", label, v)))
        .collect();
        println!("\n  {}", facts.join(" | "));
    }
    Ok(())
}
