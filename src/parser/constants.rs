// Constants for the expression parser

/// Deepest allowed chain of parentheses and unary operators in one statement.
/// The grammar recurses once per level, so this bounds the parser's stack use.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Tallest expression tree one statement may build, counting every node on
/// the longest root-to-leaf path. A flat chain like `1 + 1 + ... + 1` grows
/// one level per operator, and evaluating, printing or dropping the tree
/// recurses once per level.
pub const MAX_TREE_HEIGHT: usize = 1024;
