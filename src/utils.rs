//! Utils

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use thiserror::Error;

use crate::{
    render::Render,
    widget::{Widget, WidgetError},
};

/// Arguments for the checkout example
#[derive(Debug, Parser)]
pub struct ExampleCheckoutArgs {
    /// Catalog of add-to-cart triggers
    #[clap(short, long, default_value = "fixtures/catalog.yml")]
    pub catalog: PathBuf,

    /// Cart configuration (currency, tax rate)
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Clicks to replay: `add:NAME`, `inc:NAME`, `dec:NAME` or `continue`
    pub actions: Vec<Action>,
}

/// Errors parsing a scripted action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// The action verb is not recognised.
    #[error("Unknown action: {0}")]
    Unknown(String),

    /// The action needs an item name.
    #[error("Action {0} needs an item name")]
    MissingName(String),
}

/// One scripted interaction with the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Click an add-to-cart trigger.
    Add(String),

    /// Click a line's `+` control.
    Increment(String),

    /// Click a line's `-` control.
    Decrement(String),

    /// Click the continue action.
    Continue,
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed == "continue" {
            return Ok(Action::Continue);
        }

        let (verb, name) = trimmed
            .split_once(':')
            .ok_or_else(|| ActionError::Unknown(trimmed.to_string()))?;

        let name = name.trim();

        if name.is_empty() {
            return Err(ActionError::MissingName(verb.to_string()));
        }

        match verb {
            "add" => Ok(Action::Add(name.to_string())),
            "inc" => Ok(Action::Increment(name.to_string())),
            "dec" => Ok(Action::Decrement(name.to_string())),
            other => Err(ActionError::Unknown(other.to_string())),
        }
    }
}

impl Action {
    /// Dispatch this action to the matching widget handler.
    ///
    /// # Errors
    ///
    /// Returns whatever the handler returns.
    pub fn apply<R: Render>(&self, widget: &mut Widget<R>) -> Result<(), WidgetError> {
        match self {
            Action::Add(name) => widget.on_add_click(name),
            Action::Increment(name) => widget.on_increment(name),
            Action::Decrement(name) => widget.on_decrement(name),
            Action::Continue => widget.on_continue().map(|_revealed| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::{
        catalog::{AddButton, Catalog},
        config::CartConfig,
        render::NoopRenderer,
    };

    use super::*;

    #[test]
    fn parses_all_verbs() -> TestResult {
        assert_eq!("add:Bread".parse::<Action>()?, Action::Add("Bread".to_string()));
        assert_eq!(
            "inc: Bread".parse::<Action>()?,
            Action::Increment("Bread".to_string())
        );
        assert_eq!(
            "dec:Bread".parse::<Action>()?,
            Action::Decrement("Bread".to_string())
        );
        assert_eq!(" continue ".parse::<Action>()?, Action::Continue);

        Ok(())
    }

    #[test]
    fn rejects_unknown_verbs_and_missing_names() {
        assert_eq!(
            "remove:Bread".parse::<Action>(),
            Err(ActionError::Unknown("remove".to_string()))
        );
        assert_eq!(
            "add:".parse::<Action>(),
            Err(ActionError::MissingName("add".to_string()))
        );
        assert_eq!(
            "checkout".parse::<Action>(),
            Err(ActionError::Unknown("checkout".to_string()))
        );
    }

    #[test]
    fn apply_dispatches_to_widget() -> TestResult {
        let catalog = Catalog::with_buttons([AddButton::new("Eggs", Money::from_minor(300, EUR))])?;
        let mut widget = Widget::new(&CartConfig::default(), catalog, NoopRenderer);

        for action in ["add:Eggs", "add:Eggs", "inc:Eggs", "dec:Eggs", "continue"] {
            action.parse::<Action>()?.apply(&mut widget)?;
        }

        let line = widget.cart().get("Eggs").ok_or("missing line")?;

        assert_eq!(line.quantity().get(), 2);
        assert!(widget.delivery().is_visible());

        Ok(())
    }

    #[test]
    fn args_parse_actions() -> TestResult {
        let args = ExampleCheckoutArgs::try_parse_from(["checkout", "add:Bread", "continue"])?;

        assert_eq!(args.actions, vec![Action::Add("Bread".to_string()), Action::Continue]);
        assert_eq!(args.catalog, PathBuf::from("fixtures/catalog.yml"));
        assert!(args.config.is_none());

        Ok(())
    }
}
