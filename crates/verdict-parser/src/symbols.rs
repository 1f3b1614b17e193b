//! Operator symbols accepted in s-expressions

use verdict_core::Operator;

/// Short aliases accepted in addition to the operator names
const ALIASES: &[(&str, Operator)] = &[
    ("=", Operator::Eq),
    ("+", Operator::Add),
    ("-", Operator::Sub),
    ("*", Operator::Mult),
    ("/", Operator::Div),
    ("%", Operator::Mod),
    (">", Operator::Gt),
    (">=", Operator::Gte),
    ("<", Operator::Lt),
    ("<=", Operator::Lte),
];

/// Resolve an operator name or alias
pub(crate) fn resolve(symbol: &str) -> Option<Operator> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == symbol)
        .map(|(_, op)| *op)
        .or_else(|| symbol.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(resolve("="), Some(Operator::Eq));
        assert_eq!(resolve("eq"), Some(Operator::Eq));
        assert_eq!(resolve(">="), Some(Operator::Gte));
        assert_eq!(resolve("mult"), Some(Operator::Mult));
        assert_eq!(resolve("if"), Some(Operator::If));
        assert_eq!(resolve("let"), Some(Operator::Let));
        assert_eq!(resolve("fnv"), Some(Operator::Fnv));
        assert_eq!(resolve("percentile"), Some(Operator::Percentile));
        assert_eq!(resolve("intToFloat"), Some(Operator::IntToFloat));
        assert_eq!(resolve("=="), None);
    }
}
