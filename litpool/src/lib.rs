//!
//! litpool - Literal Values for a Script Engine
//!
//! This crate provides the literal layer of a script compiler: the compact
//! value type the parser produces for every constant it meets, and the pool
//! that stores each distinct constant once. It includes:
//!
//! - catalog: the fixed table of well-known strings
//! - strings: borrowed length-prefixed strings with a suffix hash
//! - number: canonical number-to-text rendering
//! - literal: the `Literal` value, canonical construction and equality
//! - pool: insertion-ordered literal deduplication
//! - source, scanner, diagnostic, config: the plumbing behind the CLI
//!
//! Entry points:
//! - `Literal::from_text` / `Literal::from_number`: build a literal
//! - `Literal::equals`: compare two literals by value
//! - `LiteralPool::intern`: deduplicate literals
//! - `scan`: pull literals out of source text
//!

pub mod catalog;
pub mod config;
pub mod diagnostic;
pub mod literal;
pub mod number;
pub mod pool;
pub mod scanner;
pub mod source;
pub mod strings;

pub use catalog::MagicStringId;
pub use config::Config;
pub use diagnostic::DiagnosticReporter;
pub use literal::{Literal, LiteralKind};
pub use number::NumberText;
pub use pool::{LiteralIndex, LiteralPool, PoolEntry};
pub use scanner::{scan, ScanError, ScanResult};
pub use source::SourceFile;
pub use strings::{LpString, SuffixHash};

#[test]
fn test_pool_from_script() {
    let source = r#"
function area(shape) {
    if (shape.kind === "circle") {
        return Math.PI * shape.radius * shape.radius;
    }
    return shape.width * shape.height;
}

var sizes = [10, 10.0, "10", 1e1];
var label = 'length' + shape.length;
"#;

    let result = scan(source);
    assert!(result.errors.is_empty(), "scan errors: {:?}", result.errors);

    let mut pool = LiteralPool::new();
    result.intern_into(&mut pool, true);

    let ten = pool.find(&Literal::from_number(10.0)).expect("10 is pooled");
    assert_eq!(pool.find(&Literal::from_text("10")), Some(ten));
    assert!(pool.find(&Literal::from_text("length")).is_some());
    assert!(pool.find(&Literal::from_text("circle")).is_some());

    let magic = pool.iter().filter(|(_, lit)| lit.kind() == LiteralKind::MagicString).count();
    assert!(magic >= 3, "expected Math, PI and length from the catalog");
}
