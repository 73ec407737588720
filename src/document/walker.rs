use crate::cache::store::{GeometryStore, compile_path_cached};
use crate::document::registry::DefinitionRegistry;
use crate::document::shapes;
use crate::foundation::core::{Affine, Geometry, GeometryNode, Subpath};
use crate::foundation::error::{CubistError, CubistResult};
use crate::path::compiler::{CompileStats, PathCompiler, PathOptions};
use crate::style::cascade::{StyleAttrs, StyleDefaults};
use crate::transform::compose::compose_element_transform;

/// Nesting bound for the recursive walk. Self-referencing `<use>` chains
/// hit this instead of overflowing the stack.
const MAX_WALK_DEPTH: usize = 256;

/// Document-walk configuration.
#[derive(Clone, Copy, Debug)]
pub struct WalkOptions {
    /// Wrap an element's multiple results in one group (`true`), or flatten
    /// everything into the parent's list (`false`).
    pub preserve_groups: bool,
    /// Fallback values for style properties the document leaves unset.
    pub defaults: StyleDefaults,
    /// Path-compiler configuration.
    pub path: PathOptions,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            preserve_groups: true,
            defaults: StyleDefaults::default(),
            path: PathOptions::default(),
        }
    }
}

/// The element vocabulary the walker dispatches over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ElementKind {
    /// `svg`, `g`, `symbol`: recurse into children.
    Container,
    Defs,
    Path,
    Use,
    Rect,
    Circle,
    Ellipse,
    Polygon,
    Polyline,
    /// `<style>` blocks and anything unrecognized contribute nothing.
    Ignored,
}

impl ElementKind {
    fn of(tag: &str) -> Self {
        match tag {
            "svg" | "g" | "symbol" => Self::Container,
            "defs" => Self::Defs,
            "path" => Self::Path,
            "use" => Self::Use,
            "rect" => Self::Rect,
            "circle" => Self::Circle,
            "ellipse" => Self::Ellipse,
            "polygon" => Self::Polygon,
            "polyline" => Self::Polyline,
            _ => Self::Ignored,
        }
    }
}

/// Compiles SVG document text into a forest of styled, transformed
/// geometry nodes.
pub struct DocumentWalker<'s> {
    opts: WalkOptions,
    compiler: PathCompiler,
    store: Option<&'s mut dyn GeometryStore>,
}

impl<'s> DocumentWalker<'s> {
    pub fn new(opts: WalkOptions) -> Self {
        Self {
            opts,
            compiler: PathCompiler::new(opts.path),
            store: None,
        }
    }

    /// Walker that consults `store` before compiling each path string.
    pub fn with_store(opts: WalkOptions, store: &'s mut dyn GeometryStore) -> Self {
        Self {
            opts,
            compiler: PathCompiler::new(opts.path),
            store: Some(store),
        }
    }

    /// Path-compiler counters accumulated by this walker.
    pub fn stats(&self) -> CompileStats {
        self.compiler.stats()
    }

    /// Parses `text` and walks the `<svg>` root element.
    #[tracing::instrument(skip(self, text), fields(len = text.len()))]
    pub fn compile_document(&mut self, text: &str) -> CubistResult<Vec<GeometryNode>> {
        let doc = roxmltree::Document::parse(text)
            .map_err(|err| CubistError::document(format!("XML parse error: {err}")))?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(CubistError::document(format!(
                "root element is <{}>, not <svg>",
                root.tag_name().name()
            )));
        }

        let mut registry = DefinitionRegistry::new();
        let nodes = self.walk_element(&doc, root, StyleAttrs::default(), &mut registry, false, 0)?;
        tracing::debug!(
            nodes = nodes.len(),
            definitions = registry.len(),
            "compiled document"
        );
        Ok(nodes)
    }

    fn walk_element(
        &mut self,
        doc: &roxmltree::Document<'_>,
        node: roxmltree::Node<'_, '_>,
        inherited: StyleAttrs,
        registry: &mut DefinitionRegistry,
        in_defs: bool,
        depth: usize,
    ) -> CubistResult<Vec<GeometryNode>> {
        if depth > MAX_WALK_DEPTH {
            return Err(CubistError::document(
                "element nesting exceeds the walk depth limit",
            ));
        }
        if !node.is_element() {
            return Ok(Vec::new());
        }

        let style = StyleAttrs::from_element(node)?.or(inherited);
        let kind = ElementKind::of(node.tag_name().name());

        let mut results = match kind {
            ElementKind::Container | ElementKind::Defs => {
                let nested_defs = in_defs || kind == ElementKind::Defs;
                let mut out = Vec::new();
                for child in node.children() {
                    out.extend(self.walk_element(
                        doc,
                        child,
                        style,
                        registry,
                        nested_defs,
                        depth + 1,
                    )?);
                }
                out
            }
            ElementKind::Path => match node.attribute("d") {
                Some(d) if !d.trim().is_empty() => self.path_geometry(d, style)?,
                _ => Vec::new(),
            },
            ElementKind::Use => self.resolve_use(doc, node, style, registry, depth)?,
            ElementKind::Rect => self.rect_geometry(node, style)?,
            ElementKind::Circle => self.circle_geometry(node, style)?,
            ElementKind::Ellipse => self.ellipse_geometry(node, style)?,
            ElementKind::Polygon => self.poly_geometry(node, style, true)?,
            ElementKind::Polyline => self.poly_geometry(node, style, false)?,
            ElementKind::Ignored => Vec::new(),
        };

        // Per-element transform over the element's aggregate output.
        let t = compose_element_transform(
            node.attribute("transform"),
            length_attr(node, "x")?,
            length_attr(node, "y")?,
        )?;
        if t != Affine::IDENTITY {
            for result in &mut results {
                result.apply_affine(t);
            }
        }

        if self.opts.preserve_groups && results.len() > 1 {
            results = vec![GeometryNode::Group {
                children: results,
                transform: t,
            }];
        }

        // Ids inside a defs subtree register after their children, with the
        // style cascade captured at this point.
        if in_defs && let Some(id) = node.attribute("id") {
            registry.register(id, node.id(), style);
        }

        if kind == ElementKind::Defs {
            return Ok(Vec::new());
        }

        Ok(results)
    }

    fn resolve_use(
        &mut self,
        doc: &roxmltree::Document<'_>,
        node: roxmltree::Node<'_, '_>,
        use_site: StyleAttrs,
        registry: &mut DefinitionRegistry,
        depth: usize,
    ) -> CubistResult<Vec<GeometryNode>> {
        let href = node
            .attributes()
            .find(|attr| attr.name() == "href")
            .map(|attr| attr.value());
        let Some(href) = href else {
            tracing::warn!("use element has no href attribute");
            return Ok(Vec::new());
        };
        let id = href.strip_prefix('#').unwrap_or(href);

        let Some(def) = registry.resolve(id) else {
            tracing::warn!(id, "use references an id that is not registered");
            return Ok(Vec::new());
        };
        let Some(target) = doc.get_node(def.node_id) else {
            return Ok(Vec::new());
        };

        // Definition-site styling is authoritative; the use site shows
        // through only where the definition left properties unset.
        let merged = def.style.or(use_site);
        self.walk_element(doc, target, merged, registry, false, depth + 1)
    }

    fn path_geometry(&mut self, d: &str, style: StyleAttrs) -> CubistResult<Vec<GeometryNode>> {
        let subpaths = match self.store.as_deref_mut() {
            Some(store) => compile_path_cached(&mut self.compiler, store, d)?,
            None => self.compiler.compile(d)?,
        };
        Ok(self.leaf(subpaths, style))
    }

    fn rect_geometry(
        &mut self,
        node: roxmltree::Node<'_, '_>,
        mut style: StyleAttrs,
    ) -> CubistResult<Vec<GeometryNode>> {
        let width = required_length(node, "width")?;
        let height = required_length(node, "height")?;
        let radius = shapes::corner_radius(node.attribute("rx"))?;
        // A rect takes stroke width from its own attribute only; absent means
        // zero, not the cascade value.
        if node.attribute("stroke-width").is_none() {
            style.stroke_width = Some(0.0);
        }

        let mut subpath = if radius > 0.0 {
            shapes::rounded_rect_subpath(width, height, radius)
        } else {
            shapes::rect_subpath(width, height)
        };
        // Native rect geometry is center-anchored; the element's origin is
        // its top-left corner.
        subpath.apply_affine(Affine::translate((width / 2.0, -height / 2.0)));
        Ok(self.leaf(vec![subpath], style))
    }

    fn circle_geometry(
        &mut self,
        node: roxmltree::Node<'_, '_>,
        style: StyleAttrs,
    ) -> CubistResult<Vec<GeometryNode>> {
        let cx = length_attr(node, "cx")?.unwrap_or(0.0);
        let cy = length_attr(node, "cy")?.unwrap_or(0.0);
        let r = length_attr(node, "r")?.unwrap_or(0.0);

        let mut subpath = shapes::unit_circle_subpath();
        subpath.apply_affine(Affine::translate((cx, -cy)) * Affine::scale(r));
        Ok(self.leaf(vec![subpath], style))
    }

    fn ellipse_geometry(
        &mut self,
        node: roxmltree::Node<'_, '_>,
        style: StyleAttrs,
    ) -> CubistResult<Vec<GeometryNode>> {
        let cx = length_attr(node, "cx")?.unwrap_or(0.0);
        let cy = length_attr(node, "cy")?.unwrap_or(0.0);
        let rx = length_attr(node, "rx")?.unwrap_or(0.0);
        let ry = length_attr(node, "ry")?.unwrap_or(0.0);

        let mut subpath = shapes::unit_circle_subpath();
        subpath.apply_affine(Affine::translate((cx, -cy)) * Affine::scale_non_uniform(rx, ry));
        Ok(self.leaf(vec![subpath], style))
    }

    fn poly_geometry(
        &mut self,
        node: roxmltree::Node<'_, '_>,
        style: StyleAttrs,
        close: bool,
    ) -> CubistResult<Vec<GeometryNode>> {
        let Some(points) = node.attribute("points") else {
            return Ok(Vec::new());
        };
        let d = shapes::points_to_path_string(points, close)?;
        if d.is_empty() {
            return Ok(Vec::new());
        }
        self.path_geometry(&d, style)
    }

    fn leaf(&self, subpaths: Vec<Subpath>, style: StyleAttrs) -> Vec<GeometryNode> {
        if subpaths.is_empty() {
            return Vec::new();
        }
        let resolved = style.resolve(&self.opts.defaults);
        vec![GeometryNode::Leaf(Geometry::new(subpaths, resolved))]
    }
}

/// One-shot convenience: walk `text` with `opts` and no cache.
pub fn compile_document(text: &str, opts: WalkOptions) -> CubistResult<Vec<GeometryNode>> {
    DocumentWalker::new(opts).compile_document(text)
}

fn length_attr(node: roxmltree::Node<'_, '_>, name: &str) -> CubistResult<Option<f64>> {
    node.attribute(name).map(shapes::parse_length).transpose()
}

fn required_length(node: roxmltree::Node<'_, '_>, name: &str) -> CubistResult<f64> {
    match node.attribute(name) {
        Some(value) => shapes::parse_length(value),
        None => Err(CubistError::document(format!(
            "<{}> is missing the {name} attribute",
            node.tag_name().name()
        ))),
    }
}
