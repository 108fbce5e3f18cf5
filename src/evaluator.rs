use std::fmt;

use crate::{
    ast::{CompareOp, Expr, Field, Literal},
    error::FilterError,
    schema::{FieldAccessor, FieldSchema, resolve_field},
    value::{Value, coerce, compare},
};

/// A comparison with its field already resolved and its literal already
/// coerced, so testing a record does no lookups or conversions.
enum Comparator<R> {
    Int {
        get: fn(&R) -> i64,
        op: CompareOp,
        rhs: i64,
    },
    Str {
        get: fn(&R) -> &str,
        op: CompareOp,
        rhs: String,
    },
    Bool {
        get: fn(&R) -> bool,
        op: CompareOp,
        rhs: bool,
    },
}

impl<R> Comparator<R> {
    fn test(&self, record: &R) -> bool {
        match self {
            Comparator::Int { get, op, rhs } => compare(*op, &get(record), rhs),
            Comparator::Str { get, op, rhs } => compare(*op, get(record), rhs.as_str()),
            Comparator::Bool { get, op, rhs } => compare(*op, &get(record), rhs),
        }
    }
}

enum Node<R> {
    Compare(Comparator<R>),
    And(Box<Node<R>>, Box<Node<R>>),
    Or(Box<Node<R>>, Box<Node<R>>),
    Not(Box<Node<R>>),
}

impl<R> Node<R> {
    fn eval(&self, record: &R) -> bool {
        match self {
            Node::Compare(cmp) => cmp.test(record),
            Node::And(left, right) => left.eval(record) && right.eval(record),
            Node::Or(left, right) => left.eval(record) || right.eval(record),
            Node::Not(operand) => !operand.eval(record),
        }
    }
}

/// A compiled filter for records of type `R`.
///
/// Immutable once built: it can be evaluated any number of times and shared
/// between threads.
///
/// # Examples
///
/// ```
/// use sieve_lang::{Store, filter, parse_filter};
///
/// let stores = vec![
///     Store::new("store-1", "Gadget Haven", "Tech gadgets.", 150, 0),
///     Store::new("store-2", "Book World", "Books.", 200, 0),
/// ];
///
/// let predicate = parse_filter::<Store>("GREATER_THAN(views,160)").unwrap();
/// let ids: Vec<&str> = filter(&predicate, &stores).iter().map(|s| s.id.as_str()).collect();
/// assert_eq!(ids, vec!["store-2"]);
/// ```
pub struct Predicate<R> {
    root: Node<R>,
    expr: Expr,
}

impl<R> Predicate<R> {
    /// Test one record.
    pub fn matches(&self, record: &R) -> bool {
        self.root.eval(record)
    }

    /// The expression tree this predicate was compiled from.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl<R> fmt::Display for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.expr, f)
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.expr.to_string()).finish()
    }
}

/// Resolve every field and coerce every literal of `expr` against `schema`.
pub fn compile<R>(expr: Expr, schema: &FieldSchema<R>) -> Result<Predicate<R>, FilterError> {
    let root = compile_node(&expr, schema)?;
    tracing::debug!(
        filter = %expr,
        comparisons = expr.comparisons(),
        depth = expr.depth(),
        "compiled filter"
    );
    Ok(Predicate { root, expr })
}

fn compile_node<R>(expr: &Expr, schema: &FieldSchema<R>) -> Result<Node<R>, FilterError> {
    match expr {
        Expr::Comparison { op, field, literal } => {
            compile_comparison(*op, field, literal, schema).map(Node::Compare)
        }
        Expr::And { left, right } => Ok(Node::And(
            Box::new(compile_node(left, schema)?),
            Box::new(compile_node(right, schema)?),
        )),
        Expr::Or { left, right } => Ok(Node::Or(
            Box::new(compile_node(left, schema)?),
            Box::new(compile_node(right, schema)?),
        )),
        Expr::Not { operand } => Ok(Node::Not(Box::new(compile_node(operand, schema)?))),
    }
}

fn compile_comparison<R>(
    op: CompareOp,
    field: &Field,
    literal: &Literal,
    schema: &FieldSchema<R>,
) -> Result<Comparator<R>, FilterError> {
    let def = resolve_field(schema, field)?;
    let field_type = def.value_type();

    if op.is_ordering() && !field_type.is_orderable() {
        return Err(FilterError::TypeCoercion {
            field: def.name.clone(),
            literal: literal.text.clone(),
            reason: format!("{} is not defined for {} fields", op, field_type),
            position: field.position,
        });
    }

    match (def.accessor, coerce(&def.name, literal, field_type)?) {
        (FieldAccessor::Int(get), Value::Int(rhs)) => Ok(Comparator::Int { get, op, rhs }),
        (FieldAccessor::Str(get), Value::Str(rhs)) => Ok(Comparator::Str { get, op, rhs }),
        (FieldAccessor::Bool(get), Value::Bool(rhs)) => Ok(Comparator::Bool { get, op, rhs }),
        (_, value) => Err(FilterError::TypeCoercion {
            field: def.name.clone(),
            literal: literal.text.clone(),
            reason: format!("coerced to {} instead of {}", value.value_type(), field_type),
            position: literal.position,
        }),
    }
}

/// Test one record against a compiled predicate.
pub fn evaluate<R>(predicate: &Predicate<R>, record: &R) -> bool {
    predicate.matches(record)
}

/// Keep the records the predicate accepts, in their original order.
pub fn filter<'a, R, I>(predicate: &Predicate<R>, records: I) -> Vec<&'a R>
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter(|record| predicate.matches(record))
        .collect()
}
