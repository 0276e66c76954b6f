use crate::gesture::{hit_test, HitTarget};
use crate::{
    AnchorKind, CanvasBounds, ConnectionRouter, EditorConfig, GeometryAdapter, GestureOutcome,
    LayoutGeometry, Node, NodeCategory, NodeId, NodeKind, NodeLayout, Point, PointerDevice,
    PointerEvent, PointerPhase, Rectangle, Route, RunSignal, ValidationSeverity,
    WorkflowDocument, WorkflowEditor,
};
use egui::{
    epaint::PathShape, pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke,
};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

/// Pointer id used for mouse and pen input; touches use their own ids offset by one
const MOUSE_POINTER_ID: u64 = 0;

/// Geometry adapter over the egui canvas rect. Node geometry comes from the
/// configured layout; the canvas origin is the top-left of the painter area.
#[derive(Debug, Clone, Copy)]
pub struct EguiGeometry {
    inner: LayoutGeometry,
}

impl EguiGeometry {
    pub fn new(layout: NodeLayout, canvas_rect: Rect) -> Self {
        Self {
            inner: LayoutGeometry::new(
                layout,
                CanvasBounds {
                    width: canvas_rect.width(),
                    height: canvas_rect.height(),
                    origin_x: canvas_rect.left(),
                    origin_y: canvas_rect.top(),
                },
            ),
        }
    }

    /// Convert canvas coordinates to screen coordinates
    fn to_screen(&self, point: Point) -> Pos2 {
        let surface = self.inner.canvas.to_surface(point);
        pos2(surface.x, surface.y)
    }

    /// Convert canvas rectangle to screen rectangle
    fn to_screen_rect(&self, rect: Rectangle) -> Rect {
        Rect::from_min_size(
            self.to_screen(Point::new(rect.x, rect.y)),
            vec2(rect.width, rect.height),
        )
    }

    fn to_canvas(&self, pos: Pos2) -> Point {
        self.inner.canvas.to_canvas(Point::new(pos.x, pos.y))
    }
}

impl GeometryAdapter for EguiGeometry {
    fn anchor_bounds(&self, node: &Node, anchor: AnchorKind) -> Rectangle {
        self.inner.anchor_bounds(node, anchor)
    }

    fn node_bounds(&self, node: &Node) -> Rectangle {
        self.inner.node_bounds(node)
    }

    fn header_bounds(&self, node: &Node) -> Rectangle {
        self.inner.header_bounds(node)
    }

    fn canvas_bounds(&self) -> CanvasBounds {
        self.inner.canvas
    }
}

/// Translate one raw egui event into a device-independent pointer event.
/// Positions stay in screen space.
pub fn translate_event(event: &egui::Event, detach: bool) -> Option<PointerEvent> {
    let (phase, pos, pointer_id, device) = match event {
        egui::Event::PointerMoved(pos) => {
            (PointerPhase::Move, *pos, MOUSE_POINTER_ID, PointerDevice::Mouse)
        }
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            ..
        } => {
            let phase = if *pressed {
                PointerPhase::Down
            } else {
                PointerPhase::Up
            };
            (phase, *pos, MOUSE_POINTER_ID, PointerDevice::Mouse)
        }
        egui::Event::Touch { id, phase, pos, .. } => {
            let phase = match phase {
                egui::TouchPhase::Start => PointerPhase::Down,
                egui::TouchPhase::Move => PointerPhase::Move,
                egui::TouchPhase::End => PointerPhase::Up,
                egui::TouchPhase::Cancel => PointerPhase::Leave,
            };
            (phase, *pos, id.0 + 1, PointerDevice::Touch)
        }
        _ => return None,
    };

    let mut pointer = PointerEvent::new(phase, Point::new(pos.x, pos.y))
        .with_pointer(pointer_id, device);
    if detach && phase == PointerPhase::Down {
        pointer = pointer.detaching();
    }
    Some(pointer)
}

/// Main application state
pub struct WorkflowCanvasApp {
    editor: WorkflowEditor,

    /// Node shown in the properties panel
    selected_node: Option<NodeId>,

    /// Palette entry being dragged onto the canvas
    palette_drag: Option<NodeKind>,

    /// Canvas area of the previous frame, for palette drops
    last_canvas_rect: Option<Rect>,

    /// Path used by Save and Open
    path_buffer: String,

    /// Status message
    status_message: String,

    /// Validation issues per node
    validation_issues: HashMap<NodeId, ValidationSeverity>,

    /// Whether validation panel is visible
    show_validation_panel: bool,

    show_grid: bool,
}

impl Default for WorkflowCanvasApp {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl WorkflowCanvasApp {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            editor: WorkflowEditor::new(config),
            selected_node: None,
            palette_drag: None,
            last_canvas_rect: None,
            path_buffer: "workflow.json".to_string(),
            status_message: "Drag nodes from the palette to start building".to_string(),
            validation_issues: HashMap::new(),
            show_validation_panel: false,
            show_grid: true,
        }
    }

    pub fn editor(&self) -> &WorkflowEditor {
        &self.editor
    }

    fn save_document(&mut self) {
        let path = PathBuf::from(&self.path_buffer);
        match self.editor.document().save(&path) {
            Ok(()) => self.status_message = format!("✓ Saved to {}", path.display()),
            Err(e) => self.status_message = format!("❌ Save failed: {:#}", e),
        }
    }

    fn open_document(&mut self) {
        let path = PathBuf::from(&self.path_buffer);
        match WorkflowDocument::load(&path) {
            Ok(document) => {
                self.editor.load(document);
                self.selected_node = None;
                self.status_message = format!(
                    "Loaded {} ({} nodes)",
                    self.editor.workflow_name(),
                    self.editor.store().node_count()
                );
            }
            Err(e) => self.status_message = format!("❌ Open failed: {:#}", e),
        }
    }

    fn execute_workflow(&mut self) {
        match self.editor.execute_workflow(Instant::now()) {
            Ok(outcome) => self.status_message = outcome.to_string(),
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn new_workflow(&mut self) {
        self.editor.new_workflow();
        self.selected_node = None;
        self.status_message = "New workflow".to_string();
    }

    /// Advance the run and schedule the next repaint
    fn tick(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        for signal in self.editor.tick(now) {
            self.apply_signal(signal);
        }
        if let Some(deadline) = self.editor.runs().next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    fn apply_signal(&mut self, signal: RunSignal) {
        let title = |editor: &WorkflowEditor, id: &NodeId| {
            editor
                .store()
                .node(id)
                .map(|n| n.title.clone())
                .unwrap_or_else(|| id.to_string())
        };

        match signal {
            RunSignal::Activated { node, .. } => {
                self.status_message = format!("▶ {}", title(&self.editor, &node));
            }
            RunSignal::Settled { node, outcome, .. } => {
                let marker = if outcome.is_success() { "✓" } else { "❌" };
                self.status_message = format!(
                    "{} {}: {}",
                    marker,
                    title(&self.editor, &node),
                    outcome.message()
                );
            }
            RunSignal::Completed { .. } => {
                self.status_message = "Workflow executed successfully!".to_string();
            }
            RunSignal::Halted { node, reason, .. } => {
                self.status_message = format!(
                    "❌ Workflow halted at {}: {}",
                    title(&self.editor, &node),
                    reason
                );
            }
            RunSignal::Cancelled { .. } => {}
        }
    }

    fn apply_gesture(&mut self, outcome: GestureOutcome) {
        match outcome {
            GestureOutcome::NodeDragStarted { node } => self.selected_node = Some(node),
            GestureOutcome::Connected { replaced, .. } => {
                self.status_message = if replaced.is_some() {
                    "Connection moved".to_string()
                } else {
                    "Nodes connected".to_string()
                };
            }
            GestureOutcome::ConnectionMissed { removed: Some(_) } => {
                self.status_message = "Connection removed".to_string();
            }
            GestureOutcome::ConnectionRejected { reason } => {
                self.status_message = format!("⚠ {}", reason);
            }
            _ => {}
        }
    }

    /// Render the entire UI
    fn render_ui(&mut self, ctx: &egui::Context) {
        let result = self.editor.validate();
        self.validation_issues = result.nodes_with_issues();

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🗋 New Workflow").clicked() {
                    self.new_workflow();
                }
                if ui.button("▶ Execute").clicked() {
                    self.execute_workflow();
                }

                ui.separator();

                ui.add(egui::TextEdit::singleline(&mut self.path_buffer).desired_width(180.0));
                if ui.button("💾 Save").clicked() {
                    self.save_document();
                }
                if ui.button("📂 Open").clicked() {
                    self.open_document();
                }

                ui.separator();

                ui.checkbox(&mut self.show_validation_panel, "Validation");
                ui.checkbox(&mut self.show_grid, "Grid");

                ui.separator();

                ui.label(format!("Nodes: {}", self.editor.store().node_count()));
                ui.label(format!(
                    "Connections: {}",
                    self.editor.store().connection_count()
                ));
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
            });
        });

        if self.show_validation_panel {
            egui::TopBottomPanel::bottom("validation_panel")
                .default_height(160.0)
                .show(ctx, |ui| {
                    self.render_validation_panel(ui);
                });
        }

        egui::SidePanel::left("palette")
            .default_width(200.0)
            .show(ctx, |ui| {
                self.render_palette(ui);
            });

        egui::SidePanel::right("properties_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                self.render_properties_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_canvas(ui);
        });
    }

    /// Node catalog grouped by category. Click adds at the fallback
    /// position; drag drops at the pointer.
    fn render_palette(&mut self, ui: &mut egui::Ui) {
        ui.heading("Nodes");
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for category in [NodeCategory::Trigger, NodeCategory::Action, NodeCategory::Utility] {
                ui.label(
                    egui::RichText::new(category_label(category))
                        .color(category_color(category))
                        .strong(),
                );
                for kind in NodeKind::catalog()
                    .iter()
                    .copied()
                    .filter(|k| k.category() == category)
                {
                    let response = ui
                        .button(kind.title())
                        .on_hover_text(kind.description())
                        .interact(Sense::drag());

                    if response.clicked() {
                        let id = self.editor.add_node_to_canvas(kind, None);
                        self.selected_node = Some(id);
                    }
                    if response.drag_started() {
                        self.palette_drag = Some(kind);
                    }
                    if response.drag_stopped() {
                        self.drop_palette_node(ui.ctx());
                    }
                }
                ui.add_space(8.0);
            }
        });
    }

    fn drop_palette_node(&mut self, ctx: &egui::Context) {
        let Some(kind) = self.palette_drag.take() else {
            return;
        };
        let (Some(canvas_rect), Some(pos)) = (
            self.last_canvas_rect,
            ctx.input(|i| i.pointer.latest_pos()),
        ) else {
            return;
        };
        if !canvas_rect.contains(pos) {
            return;
        }

        let geometry = self.geometry(canvas_rect);
        let id = self
            .editor
            .add_node_to_canvas(kind, Some(geometry.to_canvas(pos)));
        self.selected_node = Some(id);
    }

    /// Render the properties panel
    fn render_properties_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Properties");
        ui.separator();

        let Some(node) = self
            .selected_node
            .as_ref()
            .and_then(|id| self.editor.store().node(id))
            .cloned()
        else {
            ui.label("Select a node to view its settings");
            return;
        };

        ui.label(egui::RichText::new(&node.title).strong());
        ui.label(node.kind.description());
        ui.label(format!("Type: {}", node.kind));
        ui.label(format!("Category: {}", node.category));
        ui.label(format!("ID: {}", node.id));
        ui.separator();

        let mut changes = Vec::new();
        egui::Grid::new("node_config").num_columns(2).show(ui, |ui| {
            for (key, value) in &node.config {
                ui.label(key);
                let mut text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                if ui.text_edit_singleline(&mut text).changed() {
                    changes.push((key.clone(), edited_value(value, text)));
                }
                ui.end_row();
            }
        });
        for (key, value) in changes {
            if let Err(e) = self.editor.store_mut().update_node_config(&node.id, key, value) {
                self.status_message = format!("❌ {}", e);
            }
        }

        ui.separator();
        if ui.button("🗑 Delete Node").clicked() {
            let removed = self.editor.remove_node(&node.id);
            self.status_message = format!(
                "Deleted {} and {} connection(s)",
                node.title,
                removed.len()
            );
            self.selected_node = None;
        }
    }

    /// Render the validation panel
    fn render_validation_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Validation");
        ui.separator();

        let result = self.editor.validate();

        ui.horizontal(|ui| {
            let error_count = result.errors().len();
            let warning_count = result.warnings().len();
            if error_count > 0 {
                ui.colored_label(Color32::RED, format!("❌ {} Errors", error_count));
            }
            if warning_count > 0 {
                ui.colored_label(
                    Color32::from_rgb(255, 165, 0),
                    format!("⚠ {} Warnings", warning_count),
                );
            }
            if error_count == 0 && warning_count == 0 {
                ui.colored_label(Color32::GREEN, "✓ All checks passed");
            }
        });

        egui::ScrollArea::vertical().show(ui, |ui| {
            for issue in &result.issues {
                ui.horizontal(|ui| {
                    ui.colored_label(
                        severity_color(issue.severity),
                        severity_marker(issue.severity),
                    );
                    ui.label(&issue.message);
                    if let Some(node) = issue.affected_nodes.first() {
                        if ui.small_button("Go to").clicked() {
                            self.selected_node = Some(node.clone());
                        }
                    }
                });
            }
        });
    }

    fn geometry(&self, canvas_rect: Rect) -> EguiGeometry {
        EguiGeometry::new(self.editor.config().canvas.layout, canvas_rect)
    }

    /// Render the canvas with nodes and connections
    fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let canvas_rect = response.rect;
        self.last_canvas_rect = Some(canvas_rect);
        let geometry = self.geometry(canvas_rect);

        self.handle_pointer_input(ui, canvas_rect, &geometry);

        painter.rect_filled(canvas_rect, 0.0, Color32::from_gray(248));
        if self.show_grid {
            self.draw_grid(&painter, canvas_rect);
        }

        let detached = self.editor.gestures().detached().cloned();
        for (id, route) in ConnectionRouter::route_all(self.editor.store(), &geometry) {
            if Some(&id) == detached.as_ref() {
                continue;
            }
            self.draw_connection(&painter, &geometry, &route);
        }

        let painter = painter.with_clip_rect(canvas_rect);
        for node in self.editor.store().nodes() {
            self.draw_node(&painter, &geometry, node);
        }

        if let Some(route) = self.editor.gestures().preview(self.editor.store(), &geometry) {
            let points = [geometry.to_screen(route.start), geometry.to_screen(route.end)];
            painter.extend(Shape::dashed_line(
                &points,
                Stroke::new(2.0, Color32::from_rgb(0, 100, 200)),
                6.0,
                4.0,
            ));
        }

        if self.editor.store().node_count() == 0 {
            painter.text(
                canvas_rect.center(),
                Align2::CENTER_CENTER,
                "Drop nodes here",
                FontId::proportional(18.0),
                Color32::from_gray(160),
            );
        }
    }

    /// Feed this frame's raw pointer events through the gesture controller
    fn handle_pointer_input(&mut self, ui: &egui::Ui, canvas_rect: Rect, geometry: &EguiGeometry) {
        let (events, alt) = ui.input(|i| (i.events.clone(), i.modifiers.alt));

        for event in &events {
            if matches!(event, egui::Event::PointerGone) {
                let outcome = self.editor.pointer_gone();
                self.apply_gesture(outcome);
                continue;
            }

            let Some(pointer) = translate_event(event, alt) else {
                continue;
            };
            let pos = pos2(pointer.position.x, pointer.position.y);

            // Presses outside the canvas belong to the panels
            if pointer.phase == PointerPhase::Down {
                if !canvas_rect.contains(pos) || self.palette_drag.is_some() {
                    continue;
                }
                if let Some(HitTarget::Header(id) | HitTarget::Body(id)) =
                    hit_test(self.editor.store(), geometry, geometry.to_canvas(pos))
                {
                    self.selected_node = Some(id);
                }
            }
            let outcome = self.editor.handle_pointer(pointer, geometry);
            self.apply_gesture(outcome);
        }
    }

    fn draw_node(&self, painter: &egui::Painter, geometry: &EguiGeometry, node: &Node) {
        let rect = geometry.to_screen_rect(geometry.node_bounds(node));
        let header = geometry.to_screen_rect(geometry.header_bounds(node));
        let accent = category_color(node.category);

        let highlighted = self.editor.highlighted() == Some(&node.id);
        let selected = self.selected_node.as_ref() == Some(&node.id);

        let fill = if highlighted {
            Color32::from_rgb(255, 247, 200)
        } else {
            Color32::WHITE
        };
        let stroke = if highlighted {
            Stroke::new(3.0, Color32::from_rgb(255, 200, 0))
        } else if let Some(severity) = self.validation_issues.get(&node.id) {
            Stroke::new(2.0, severity_color(*severity))
        } else if selected {
            Stroke::new(2.5, Color32::BLUE)
        } else {
            Stroke::new(1.5, Color32::DARK_GRAY)
        };

        painter.rect(rect, 6.0, fill, stroke);
        painter.rect_filled(header.shrink(1.0), 5.0, accent.gamma_multiply(0.25));
        painter.text(
            header.left_center() + vec2(8.0, 0.0),
            Align2::LEFT_CENTER,
            &node.title,
            FontId::proportional(14.0),
            Color32::BLACK,
        );
        painter.text(
            rect.left_bottom() + vec2(8.0, -8.0),
            Align2::LEFT_BOTTOM,
            node.category.to_string(),
            FontId::proportional(11.0),
            accent,
        );

        for anchor in [AnchorKind::Input, AnchorKind::Output] {
            let bounds = geometry.anchor_bounds(node, anchor);
            painter.circle(
                geometry.to_screen(bounds.center()),
                bounds.width / 2.0,
                Color32::WHITE,
                Stroke::new(2.0, accent),
            );
        }
    }

    /// Draw a connection with an arrowhead at its end
    fn draw_connection(&self, painter: &egui::Painter, geometry: &EguiGeometry, route: &Route) {
        let from = geometry.to_screen(route.start);
        let to = geometry.to_screen(route.end);

        let color = Color32::from_rgb(0, 100, 200);
        let stroke = Stroke::new(2.0, color);
        painter.line_segment([from, to], stroke);

        if route.length < 1.0 {
            return;
        }
        let angle = route.angle_degrees.to_radians();
        let dir = vec2(angle.cos(), angle.sin());
        let perpendicular = vec2(-dir.y, dir.x);
        let arrow_size = 10.0;
        let tip = to - dir * 7.0;

        painter.add(PathShape::convex_polygon(
            vec![
                tip,
                tip - dir * arrow_size + perpendicular * arrow_size * 0.5,
                tip - dir * arrow_size - perpendicular * arrow_size * 0.5,
            ],
            color,
            stroke,
        ));
    }

    /// Draw grid
    fn draw_grid(&self, painter: &egui::Painter, canvas_rect: Rect) {
        let grid_spacing = 50.0;
        let stroke = Stroke::new(1.0, Color32::from_gray(225));

        let mut x = canvas_rect.left();
        while x < canvas_rect.right() {
            painter.line_segment(
                [pos2(x, canvas_rect.top()), pos2(x, canvas_rect.bottom())],
                stroke,
            );
            x += grid_spacing;
        }

        let mut y = canvas_rect.top();
        while y < canvas_rect.bottom() {
            painter.line_segment(
                [pos2(canvas_rect.left(), y), pos2(canvas_rect.right(), y)],
                stroke,
            );
            y += grid_spacing;
        }
    }
}

/// Keep numbers numeric while editing; anything else becomes a string
fn edited_value(previous: &Value, text: String) -> Value {
    match previous {
        Value::Number(_) => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::String(text)),
        Value::Bool(_) => match text.trim() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(text),
        },
        _ => Value::String(text),
    }
}

fn category_label(category: NodeCategory) -> &'static str {
    match category {
        NodeCategory::Trigger => "Triggers",
        NodeCategory::Action => "Actions",
        NodeCategory::Utility => "Utilities",
    }
}

fn category_color(category: NodeCategory) -> Color32 {
    match category {
        NodeCategory::Trigger => Color32::from_rgb(230, 126, 34),
        NodeCategory::Action => Color32::from_rgb(52, 120, 219),
        NodeCategory::Utility => Color32::from_rgb(39, 174, 96),
    }
}

fn severity_color(severity: ValidationSeverity) -> Color32 {
    match severity {
        ValidationSeverity::Error => Color32::RED,
        ValidationSeverity::Warning => Color32::from_rgb(255, 165, 0),
        ValidationSeverity::Info => Color32::BLUE,
    }
}

fn severity_marker(severity: ValidationSeverity) -> &'static str {
    match severity {
        ValidationSeverity::Error => "❌",
        ValidationSeverity::Warning => "⚠",
        ValidationSeverity::Info => "ℹ",
    }
}

impl eframe::App for WorkflowCanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick(ctx);
        self.render_ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geometry_uses_canvas_origin() {
        let canvas_rect = Rect::from_min_size(pos2(200.0, 40.0), vec2(800.0, 600.0));
        let geometry = EguiGeometry::new(NodeLayout::default(), canvas_rect);

        assert_eq!(geometry.to_canvas(pos2(250.0, 90.0)), Point::new(50.0, 50.0));
        assert_eq!(geometry.to_screen(Point::new(50.0, 50.0)), pos2(250.0, 90.0));

        let bounds = geometry.canvas_bounds();
        assert_eq!(bounds.width, 800.0);
        assert_eq!(bounds.origin_x, 200.0);
    }

    #[test]
    fn test_translate_mouse_and_touch() {
        let press = egui::Event::PointerButton {
            pos: pos2(10.0, 20.0),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::default(),
        };
        let pointer = translate_event(&press, true).unwrap();
        assert_eq!(pointer.phase, PointerPhase::Down);
        assert_eq!(pointer.pointer_id, MOUSE_POINTER_ID);
        assert!(pointer.detach);

        let touch = egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(4),
            phase: egui::TouchPhase::Cancel,
            pos: pos2(1.0, 2.0),
            force: None,
        };
        let pointer = translate_event(&touch, false).unwrap();
        assert_eq!(pointer.phase, PointerPhase::Leave);
        assert_eq!(pointer.pointer_id, 5);
        assert_eq!(pointer.device, PointerDevice::Touch);

        let secondary = egui::Event::PointerButton {
            pos: pos2(0.0, 0.0),
            button: egui::PointerButton::Secondary,
            pressed: true,
            modifiers: egui::Modifiers::default(),
        };
        assert!(translate_event(&secondary, false).is_none());
    }

    #[test]
    fn test_edited_value_keeps_type() {
        assert_eq!(edited_value(&json!(1), "5".into()), json!(5.0));
        assert_eq!(edited_value(&json!(1), "five".into()), json!("five"));
        assert_eq!(edited_value(&json!("GET"), "POST".into()), json!("POST"));
        assert_eq!(edited_value(&json!(false), "true".into()), json!(true));
    }
}
