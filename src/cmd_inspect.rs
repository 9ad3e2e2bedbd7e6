//! Inspection subcommands: `classify`, `query`, `dump`, `check-config`.

use tracing::warn;

use autotap_config::{Config, ConfigValidator};
use autotap_core::{query, PageClassifier};
use autotap_protocols::UiNode;

use crate::register::register_channels;

/// Print the current page state and the signals behind it.
pub(crate) async fn classify(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let channels = register_channels(&config.channels).await;
    let classifier = PageClassifier::new(channels.provider()?, &config.markers, &config.signatures);

    let classification = classifier.classify().await;
    println!("page:     {}", classification.state);
    println!("activity: {}", classification.activity.as_deref().unwrap_or("-"));
    println!("package:  {}", classification.package.as_deref().unwrap_or("-"));

    channels.shutdown().await;
    Ok(())
}

/// Print every node matching a selector or class path.
pub(crate) async fn query_nodes(
    config: &Config,
    expr: &str,
    xpath: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = fetch_tree(config).await?;

    let nodes = if xpath {
        query::find_by_xpath(&tree, expr)
    } else {
        query::find_by_selector(&tree, expr)
    };

    for node in &nodes {
        println!("{}", summarize(node));
    }
    println!("{} match(es)", nodes.len());
    Ok(())
}

/// Print the whole foreground tree.
pub(crate) async fn dump(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tree = fetch_tree(config).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", query::describe_tree(&tree));
    }
    Ok(())
}

/// Validate and print the effective configuration.
pub(crate) fn check_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error:   {}: {}", error.path, error.message);
    }

    println!("{}", serde_json::to_string_pretty(config)?);

    result.into_result()?;
    println!("configuration is valid");
    Ok(())
}

async fn fetch_tree(config: &Config) -> Result<UiNode, Box<dyn std::error::Error>> {
    let channels = register_channels(&config.channels).await;
    let provider = channels.provider()?;
    let tree = provider.foreground_tree().await;
    channels.shutdown().await;

    tree.ok_or_else(|| {
        warn!("Helper returned no tree");
        "no foreground tree available".into()
    })
}

fn summarize(node: &UiNode) -> String {
    let b = node.bounds;
    format!(
        "{} [{},{}][{},{}] center={} id={:?} text={:?}{}",
        node.class_name,
        b.left,
        b.top,
        b.right,
        b.bottom,
        b.center(),
        node.id,
        node.text,
        if node.clickable { " clickable" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use autotap_protocols::Bounds;

    #[test]
    fn test_summarize() {
        let node = UiNode::new("android.widget.TextView")
            .with_id("pkg:id/buy")
            .with_text("立即购买")
            .with_bounds(Bounds::new(0, 0, 100, 50))
            .clickable(true);
        assert_eq!(
            summarize(&node),
            "android.widget.TextView [0,0][100,50] center=(50, 25) id=\"pkg:id/buy\" text=\"立即购买\" clickable"
        );
    }

    #[test]
    fn test_check_config_defaults_valid() {
        assert!(check_config(&Config::default()).is_ok());
    }
}
