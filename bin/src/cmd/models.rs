//! Models command implementation.

use crate::cmd::header;
use bandwatch_signals::registry::{ModelCategory, models_by_category};

/// List available models.
pub(crate) fn list_models(verbose: bool) {
    header("Available Models");

    for category in [ModelCategory::Screen, ModelCategory::Technical] {
        let models = models_by_category(category);
        if models.is_empty() {
            continue;
        }

        println!("{:?}: {}", category, category.description());
        println!("{}", "-".repeat(60));
        for info in models {
            if verbose {
                println!(
                    "  {:22} - {} (lookback: {} days)",
                    info.name, info.description, info.typical_lookback
                );
            } else {
                println!("  {}", info.name);
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for detailed model descriptions.\n");
    }
}
