//! Template evaluator.
//!
//! Walks a [`Template`] against a root object and writes escaped XML text.
//! The current object is passed down explicitly; nothing is stored on the
//! template, so one template can be rendered from many threads at once.

use std::fmt::Write;

use xmlser_xml::{check_attribute, check_tag, escape_attr, escape_text};

use super::ast::{Accessor, Element, Node, Repetition, Template, ValueExpr};
use crate::error::{NameKind, XmlSerError, XmlSerResult};
use crate::lookup::{Lookup, Pair};

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

impl Template {
    /// Render the template against `root`.
    ///
    /// Nothing is returned on failure, even if part of the output had already
    /// been produced.
    ///
    /// # Errors
    ///
    /// Returns [`XmlSerError::Lookup`] if an accessor chain cannot be resolved
    /// and [`XmlSerError::InvalidName`] if a resolved tag or attribute name is
    /// not a valid XML name.
    pub fn render(&self, root: &dyn Lookup) -> XmlSerResult<String> {
        let mut out = String::new();
        self.render_to(root, &mut out)?;
        Ok(out)
    }

    /// Render the template against `root`, writing fragments into `out` as
    /// they are produced.
    ///
    /// On failure, fragments written before the error stay in `out`.
    ///
    /// # Errors
    ///
    /// Same as [`Template::render`], plus [`XmlSerError::Write`] if the sink
    /// rejects a write.
    pub fn render_to<W: Write + ?Sized>(&self, root: &dyn Lookup, out: &mut W) -> XmlSerResult<()> {
        let mut evaluator = Evaluator { out };
        evaluator.nodes(&self.nodes, root)
    }
}

/// Resolve a value expression against `current`.
///
/// Literals resolve to themselves and `?` to `current`. Each accessor of a
/// chain tries attribute access, then key access, then (for all-digit
/// segments) sequence indexing.
///
/// # Errors
///
/// Returns [`XmlSerError::Lookup`] naming the failing segment and the path
/// resolved before it.
pub fn resolve<'a>(expr: &'a ValueExpr, current: &'a dyn Lookup) -> XmlSerResult<&'a dyn Lookup> {
    match expr {
        ValueExpr::Literal(s) => Ok(s),
        ValueExpr::Current => Ok(current),
        ValueExpr::Chain { base, accessors } => {
            let mut value = resolve(base, current)?;
            for (i, accessor) in accessors.iter().enumerate() {
                value = step(value, accessor).map_err(|reason| XmlSerError::Lookup {
                    path: path_before(base, &accessors[..i]),
                    segment: accessor.to_string(),
                    reason: reason.to_owned(),
                })?;
            }
            Ok(value)
        }
    }
}

/// Apply one accessor, in attribute, key, index order.
fn step<'a>(object: &'a dyn Lookup, accessor: &Accessor) -> Result<&'a dyn Lookup, &'static str> {
    let caps = object.capabilities();
    let name = accessor.as_str();

    if caps.attributes {
        if let Some(found) = object.attr(name) {
            return Ok(found);
        }
    }
    if caps.keys {
        if let Some(found) = object.key(name) {
            return Ok(found);
        }
    }
    if let Accessor::Index(digits) = accessor
        && caps.sequence
    {
        return digits
            .parse::<usize>()
            .ok()
            .and_then(|i| object.index(i))
            .ok_or("index out of range");
    }

    if caps.is_empty() {
        Err("object has no attributes, keys or indices")
    } else if caps.attributes || caps.keys {
        Err("no such attribute or key")
    } else if caps.sequence {
        Err("sequences only accept numeric indices")
    } else {
        Err("object only supports pair enumeration")
    }
}

fn path_before(base: &ValueExpr, accessors: &[Accessor]) -> String {
    let mut path = base.to_string();
    for accessor in accessors {
        path.push('.');
        path.push_str(&accessor.to_string());
    }
    path
}

fn not_iterable(source: &ValueExpr, marker: &str, reason: &str) -> XmlSerError {
    XmlSerError::Lookup {
        path: source.to_string(),
        segment: marker.to_owned(),
        reason: reason.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Tree walk
// ---------------------------------------------------------------------------

/// Owns the output sink for one render call.
struct Evaluator<'w, W: ?Sized> {
    out: &'w mut W,
}

impl<W: Write + ?Sized> Evaluator<'_, W> {
    fn nodes(&mut self, nodes: &[Node], current: &dyn Lookup) -> XmlSerResult<()> {
        for node in nodes {
            self.node(node, current)?;
        }
        Ok(())
    }

    fn node(&mut self, node: &Node, current: &dyn Lookup) -> XmlSerResult<()> {
        match node {
            Node::Element(element) => self.element(element, current),
            Node::Text(text) => Ok(self.out.write_str(&escape_text(text))?),
            Node::Lookup(expr) => {
                let value = resolve(expr, current)?;
                Ok(self.out.write_str(&escape_text(&value.text()))?)
            }
            Node::Group(group) => {
                let scope = resolve(&group.scope, current)?;
                self.nodes(&group.children, scope)
            }
        }
    }

    fn element(&mut self, element: &Element, current: &dyn Lookup) -> XmlSerResult<()> {
        match &element.repetition {
            None => self.emit(element, current, current),
            Some(Repetition::Count(n)) => {
                tracing::trace!(iterations = *n, "repeating element by count");
                for i in 0..*n {
                    self.emit(element, &i, &i)?;
                }
                Ok(())
            }
            Some(Repetition::List(source)) => {
                let items = resolve(source, current)?;
                self.repeat_list(element, source, items)
            }
            Some(Repetition::DictKey(source)) => {
                let items = resolve(source, current)?;
                self.repeat_dictkey(element, source, items)
            }
        }
    }

    fn repeat_list(
        &mut self,
        element: &Element,
        source: &ValueExpr,
        items: &dyn Lookup,
    ) -> XmlSerResult<()> {
        let caps = items.capabilities();
        let mut iterations = 0_usize;

        if caps.sequence {
            for item in items.elements() {
                self.emit(element, item, item)?;
                iterations += 1;
            }
        } else if caps.pairs {
            for (key, value) in items.pairs() {
                let pair = Pair { key, value };
                self.emit(element, &pair, &pair)?;
                iterations += 1;
            }
        } else if let Some(n) = items.count() {
            for i in 0..n {
                self.emit(element, &i, &i)?;
            }
            iterations = n;
        } else {
            return Err(not_iterable(
                source,
                "*",
                "not a sequence, mapping or non-negative integer",
            ));
        }

        tracing::trace!(iterations, source = %source, "repeated element over list");
        Ok(())
    }

    /// Tag and attributes see each key; children see the matching value.
    fn repeat_dictkey(
        &mut self,
        element: &Element,
        source: &ValueExpr,
        items: &dyn Lookup,
    ) -> XmlSerResult<()> {
        let caps = items.capabilities();
        let mut iterations = 0_usize;

        if caps.pairs {
            for (key, value) in items.pairs() {
                self.emit(element, key, value)?;
                iterations += 1;
            }
        } else if caps.sequence {
            for item in items.elements() {
                if !item.capabilities().sequence {
                    return Err(not_iterable(
                        source,
                        "~",
                        "sequence items are not key/value pairs",
                    ));
                }
                let (Some(key), Some(value)) = (item.index(0), item.index(1)) else {
                    return Err(not_iterable(
                        source,
                        "~",
                        "sequence items are not key/value pairs",
                    ));
                };
                self.emit(element, key, value)?;
                iterations += 1;
            }
        } else {
            return Err(not_iterable(source, "~", "not a mapping or sequence of pairs"));
        }

        tracing::trace!(iterations, source = %source, "repeated element over pairs");
        Ok(())
    }

    /// Emit one `<tag attrs>children</tag>`.
    fn emit(&mut self, element: &Element, head: &dyn Lookup, body: &dyn Lookup) -> XmlSerResult<()> {
        let tag = resolve(&element.name, head)?.text();
        check_tag(&tag).map_err(|source| XmlSerError::InvalidName {
            kind: NameKind::Tag,
            value: tag.clone().into_owned(),
            source,
        })?;

        write!(self.out, "<{tag}")?;
        for attribute in &element.attributes {
            let name = resolve(&attribute.name, head)?.text();
            check_attribute(&name).map_err(|source| XmlSerError::InvalidName {
                kind: NameKind::Attribute,
                value: name.clone().into_owned(),
                source,
            })?;
            let value = resolve(&attribute.value, head)?.text();
            write!(self.out, " {name}=\"{}\"", escape_attr(&value))?;
        }
        self.out.write_char('>')?;

        self.nodes(&element.children, body)?;

        write!(self.out, "</{tag}>")?;
        Ok(())
    }
}
