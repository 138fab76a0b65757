use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::rc::Rc;
use leptos::logging::warn;
use leptos::{wasm_bindgen, web_sys};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use crate::components::canvas_viewport;
use crate::constants::{
    CANVAS_BACKGROUND_COLOR, LABEL_COLOR, LABEL_FONT, LABEL_OFFSET, NODE_BORDER_COLOR, NODE_HIT_RADIUS,
};
use crate::engine::RenderBackend;
use crate::geometry::{Bounds, Point};
use crate::models::{NodeFill, RenderModel, RenderNode, ViewportState};

const TRANSFER_DASH: [f64; 2] = [6.0, 4.0];

/// Everything needed to paint one frame
#[derive(Default)]
struct Scene {
    model: Option<RenderModel>,
    positions: HashMap<String, Point>,
    /// Node indices sorted by z-index, drawn in this order
    node_order: Vec<usize>,
    /// Edge indices sorted by z-index
    edge_order: Vec<usize>,
    icons: HashMap<String, HtmlImageElement>,
    view: ViewportState,
    size: (f64, f64),
}

type IconListener = Closure<dyn FnMut()>;

/// [`RenderBackend`] drawing onto a 2D canvas.
///
/// Hub icons decode asynchronously; each finished icon repaints the scene.
pub struct CanvasBackend {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scene: Rc<RefCell<Scene>>,
    icon_listeners: Vec<IconListener>,
}

impl CanvasBackend {
    /// # Errors
    ///
    /// Returns an error if the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("Canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Context is not a CanvasRenderingContext2d")?;

        let backend = Self {
            canvas,
            ctx,
            scene: Rc::new(RefCell::new(Scene {
                view: ViewportState::default(),
                ..Scene::default()
            })),
            icon_listeners: Vec::new(),
        };
        backend.sync_size();
        Ok(backend)
    }

    /// Replace the view after a user gesture and repaint
    pub fn set_viewport(&mut self, view: ViewportState) {
        self.scene.borrow_mut().view = view;
        self.redraw();
    }

    /// Topmost visible node under a canvas-relative screen point
    pub fn node_at(&self, screen: Point) -> Option<String> {
        let scene = self.scene.borrow();
        let model = scene.model.as_ref()?;
        scene.node_order.iter().rev().find_map(|&i| {
            let node = &model.nodes[i];
            if !node.style.visible {
                return None;
            }
            let pos = scene.positions.get(&node.id).copied()?;
            let screen_pos = scene.view.world_to_screen(pos);
            let hit_radius = (node.style.radius * scene.view.zoom).max(NODE_HIT_RADIUS);
            (screen_pos.distance_to(screen) <= hit_radius).then(|| node.id.clone())
        })
    }

    /// Hover text of the node under a screen point
    pub fn tooltip_at(&self, screen: Point) -> Option<String> {
        let id = self.node_at(screen)?;
        let scene = self.scene.borrow();
        scene.model.as_ref()?.node(&id).map(|n| n.tooltip.clone())
    }

    pub fn redraw(&self) {
        draw_scene(&self.ctx, &self.scene.borrow());
    }

    #[allow(clippy::cast_sign_loss)]
    fn sync_size(&self) {
        let width = self.canvas.client_width().max(0);
        let height = self.canvas.client_height().max(0);
        if width > 0 && height > 0 {
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
        }
        self.scene.borrow_mut().size = (f64::from(self.canvas.width()), f64::from(self.canvas.height()));
    }

    fn load_icons(&mut self, model: &RenderModel) -> Result<HashMap<String, HtmlImageElement>, String> {
        let mut icons = HashMap::new();
        for node in model.hub_nodes() {
            let NodeFill::Icon(icon) = &node.fill else { continue };
            if icon.is_empty() {
                continue;
            }
            let img = HtmlImageElement::new().map_err(|_| "Failed to create image element")?;

            let scene = Rc::downgrade(&self.scene);
            let ctx = self.ctx.clone();
            let onload: IconListener = Closure::wrap(Box::new(move || {
                if let Some(scene) = scene.upgrade() {
                    if let Ok(scene) = scene.try_borrow() {
                        draw_scene(&ctx, &scene);
                    }
                }
            }) as Box<dyn FnMut()>);
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            img.set_src(&icon.data_url);

            self.icon_listeners.push(onload);
            icons.insert(node.id.clone(), img);
        }
        Ok(icons)
    }
}

impl RenderBackend for CanvasBackend {
    fn install(&mut self, model: &RenderModel) -> Result<(), String> {
        let icons = self.load_icons(model)?;

        let mut node_order: Vec<usize> = (0..model.nodes.len()).collect();
        node_order.sort_by_key(|&i| model.nodes[i].style.z_index);
        let mut edge_order: Vec<usize> = (0..model.edges.len()).collect();
        edge_order.sort_by_key(|&i| model.edges[i].style.z_index);

        {
            let mut scene = self.scene.borrow_mut();
            scene.positions = model.nodes.iter().map(|n| (n.id.clone(), n.position)).collect();
            scene.node_order = node_order;
            scene.edge_order = edge_order;
            scene.icons = icons;
            scene.model = Some(model.clone());
        }
        self.redraw();
        Ok(())
    }

    fn teardown(&mut self) {
        {
            let mut scene = self.scene.borrow_mut();
            for img in scene.icons.values() {
                img.set_onload(None);
            }
            scene.icons.clear();
            scene.model = None;
            scene.positions.clear();
            scene.node_order.clear();
            scene.edge_order.clear();
        }
        self.icon_listeners.clear();
        self.redraw();
    }

    fn fit(&mut self, ids: &[String], padding: f64) {
        let view = {
            let scene = self.scene.borrow();
            let points: Vec<Point> = ids.iter().filter_map(|id| scene.positions.get(id).copied()).collect();
            let Some(bounds) = Bounds::from_points(points) else {
                warn!("Nothing to fit among {} ids", ids.len());
                return;
            };
            let (width, height) = scene.size;
            canvas_viewport::fit_bounds(bounds, width, height, padding, scene.view.zoom)
        };
        self.set_viewport(view);
    }

    fn zoom(&self) -> f64 {
        self.scene.borrow().view.zoom
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.scene.borrow_mut().view.zoom = zoom;
        self.redraw();
    }

    fn pan(&self) -> Point {
        self.scene.borrow().view.pan
    }

    fn set_pan(&mut self, pan: Point) {
        self.scene.borrow_mut().view.pan = pan;
        self.redraw();
    }

    fn node_position(&self, id: &str) -> Option<Point> {
        self.scene.borrow().positions.get(id).copied()
    }

    fn set_node_position(&mut self, id: &str, position: Point) {
        self.scene.borrow_mut().positions.insert(id.to_string(), position);
        self.redraw();
    }

    fn resize(&mut self) {
        self.sync_size();
        self.redraw();
    }
}

fn draw_scene(ctx: &CanvasRenderingContext2d, scene: &Scene) {
    let (width, height) = scene.size;
    ctx.set_fill_style_str(CANVAS_BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, width, height);

    let Some(model) = &scene.model else { return };
    let zoom = scene.view.zoom;

    ctx.save();
    let _ = ctx.translate(scene.view.pan.x, scene.view.pan.y);
    let _ = ctx.scale(zoom, zoom);

    // Edges first so nodes sit on top
    for &i in &scene.edge_order {
        let edge = &model.edges[i];
        let (Some(from), Some(to)) = (scene.positions.get(&edge.source), scene.positions.get(&edge.target)) else {
            continue;
        };
        ctx.set_global_alpha(edge.style.opacity);
        ctx.set_stroke_style_str(&edge.style.color);
        ctx.set_line_width(edge.style.width / zoom);
        set_dash(ctx, edge.style.dashed, zoom);
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke();
    }
    set_dash(ctx, false, zoom);

    for &i in &scene.node_order {
        let node = &model.nodes[i];
        if !node.style.visible {
            continue;
        }
        let Some(pos) = scene.positions.get(&node.id).copied() else { continue };
        draw_node(ctx, node, pos, scene.icons.get(&node.id), zoom);
    }

    ctx.set_global_alpha(1.0);
    ctx.restore();
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &RenderNode, pos: Point, icon: Option<&HtmlImageElement>, zoom: f64) {
    let radius = node.style.radius / zoom;
    ctx.set_global_alpha(node.style.opacity);

    match (&node.fill, icon) {
        (NodeFill::Icon(_), Some(img)) if img.complete() => {
            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                pos.x - radius,
                pos.y - radius,
                radius * 2.0,
                radius * 2.0,
            );
        }
        (NodeFill::Color(color), _) => {
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            let _ = ctx.arc(pos.x, pos.y, radius, 0.0, TAU);
            ctx.fill();
            if node.style.border_width > 0.0 {
                ctx.set_stroke_style_str(NODE_BORDER_COLOR);
                ctx.set_line_width(node.style.border_width / zoom);
                ctx.stroke();
            }
        }
        _ => {
            // Icon still decoding or unavailable: outline only
            ctx.set_stroke_style_str(NODE_BORDER_COLOR);
            ctx.set_line_width(1.0 / zoom);
            ctx.begin_path();
            let _ = ctx.arc(pos.x, pos.y, radius, 0.0, TAU);
            ctx.stroke();
        }
    }

    if node.style.show_label && !node.label.is_empty() {
        ctx.save();
        let _ = ctx.translate(pos.x, pos.y);
        let _ = ctx.scale(1.0 / zoom, 1.0 / zoom);
        ctx.set_fill_style_str(LABEL_COLOR);
        ctx.set_font(LABEL_FONT);
        let _ = ctx.fill_text(&node.label, node.style.radius + LABEL_OFFSET, 4.0);
        ctx.restore();
    }
}

fn set_dash(ctx: &CanvasRenderingContext2d, dashed: bool, zoom: f64) {
    let segments = js_sys::Array::new();
    if dashed {
        for len in TRANSFER_DASH {
            segments.push(&JsValue::from_f64(len / zoom));
        }
    }
    let _ = ctx.set_line_dash(&segments);
}
