//! Element locators: an immutable (strategy, value) pair.
//!
//! A locator identifies zero or more elements in the current page. It is
//! a pure value; page objects declare them as constants-by-convention
//! and pass them into every facade call together with a human-readable
//! label for failure messages.

use thirtyfour::By;

/// Selector strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// CSS selector.
    Css,
    /// XPath expression.
    XPath,
    /// `id` attribute.
    Id,
    /// `name` attribute.
    Name,
    /// Tag name.
    Tag,
    /// Exact anchor text.
    LinkText,
}

impl Strategy {
    /// Short name used in log lines.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::XPath => "xpath",
            Self::Id => "id",
            Self::Name => "name",
            Self::Tag => "tag",
            Self::LinkText => "link-text",
        }
    }
}

/// An immutable (strategy, value) pair identifying page elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    strategy: Strategy,
    value: String,
}

impl Locator {
    /// Create a locator from an explicit strategy and value.
    pub fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    /// CSS selector locator.
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Strategy::Css, selector)
    }

    /// XPath locator.
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, expression)
    }

    /// `id` attribute locator.
    pub fn id(id: impl Into<String>) -> Self {
        Self::new(Strategy::Id, id)
    }

    /// `name` attribute locator.
    pub fn name(name: impl Into<String>) -> Self {
        Self::new(Strategy::Name, name)
    }

    /// Tag-name locator.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::new(Strategy::Tag, tag)
    }

    /// Exact link-text locator.
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::new(Strategy::LinkText, text)
    }

    /// The selector strategy.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Convert to the WebDriver wire selector.
    #[must_use]
    pub fn to_by(&self) -> By {
        match self.strategy {
            Strategy::Css => By::Css(self.value.clone()),
            Strategy::XPath => By::XPath(self.value.clone()),
            Strategy::Id => By::Id(self.value.clone()),
            Strategy::Name => By::Name(self.value.clone()),
            Strategy::Tag => By::Tag(self.value.clone()),
            Strategy::LinkText => By::LinkText(self.value.clone()),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.strategy.as_str(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_strategy() {
        assert_eq!(Locator::css("div.a").strategy(), Strategy::Css);
        assert_eq!(Locator::xpath("//div").strategy(), Strategy::XPath);
        assert_eq!(Locator::id("x").strategy(), Strategy::Id);
        assert_eq!(Locator::name("n").strategy(), Strategy::Name);
        assert_eq!(Locator::tag("iframe").strategy(), Strategy::Tag);
        assert_eq!(Locator::link_text("Sair").strategy(), Strategy::LinkText);
    }

    #[test]
    fn display_is_strategy_and_value() {
        let loc = Locator::xpath("//input[@id='login-button']");
        assert_eq!(loc.to_string(), "xpath=//input[@id='login-button']");
    }

    #[test]
    fn locators_are_value_types() {
        let a = Locator::css("button.primary");
        let b = Locator::css("button.primary");
        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
