// Strands – A word game
// Copyright (C) 2024  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use wasm_bindgen::prelude::*;
use web_sys::console;
use super::grid::{Cell, Grid};
use super::grid_math::Geometry;
use super::path::Path;
use super::rules::{Rules, UndoPolicy};
use super::session::{Session, Step};
use super::oracle::OracleError;
use super::puzzle::{HintError, Outcome, Puzzle};
use super::puzzle_data::{EntryData, PuzzleData};
use std::fmt::Write;
use js_sys::Reflect;

const SVG_NAMESPACE: &'static str = "http://www.w3.org/2000/svg";
const ACTIVE_TRAIL_ID: &'static str = "active-trail";
const PUZZLES_URL: &'static str = "puzzles.json";
const VALIDATE_WORD_URL: &'static str = "/api/validate-word";

// Width of the viewBox of the game grid
const VIEWPORT_WIDTH: f32 = 100.0;

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = JsValue::from(
            format!("{}: {}", record.target(), record.args())
        );

        match record.level() {
            log::Level::Error => console::error_1(&message),
            log::Level::Warn => console::warn_1(&message),
            _ => console::log_1(&message),
        }
    }

    fn flush(&self) {
    }
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn show_error(message: &str) {
    log::error!("{}", message);

    let Some(window) = web_sys::window()
    else {
        return;
    };

    let Some(document) = window.document()
    else {
        return;
    };

    let Some(message_elem) = document.get_element_by_id("message")
    else {
        return;
    };

    message_elem.set_text_content(Some("An error occurred"));
}

struct Context {
    document: web_sys::HtmlDocument,
    window: web_sys::Window,
    message: web_sys::HtmlElement,
}

impl Context {
    fn new() -> Result<Context, String> {
        let Some(window) = web_sys::window()
        else {
            return Err("failed to get window".to_string());
        };

        let Some(document) = window.document()
            .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        else {
            return Err("failed to get document".to_string());
        };

        let Some(message) = document.get_element_by_id("message")
            .and_then(|c| c.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            return Err("failed to get message div".to_string());
        };

        Ok(Context {
            document,
            window,
            message,
        })
    }

    fn get_element(&self, id: &str) -> Result<web_sys::HtmlElement, String> {
        self.document.get_element_by_id(id)
            .and_then(|c| c.dyn_into::<web_sys::HtmlElement>().ok())
            .ok_or_else(|| format!("failed to get {}", id))
    }
}

type PromiseClosure = Closure::<dyn FnMut(JsValue)>;
type JsonCallback = Box<dyn FnMut(Result<JsValue, String>)>;

// A fetch whose response is decoded as JSON and passed to a callback.
// The closures point back into the box so it has to stay alive until
// the request is done.
struct JsonRequest {
    callback: JsonCallback,
    done: bool,
    _response_closure: Option<PromiseClosure>,
    content_closure: Option<PromiseClosure>,
    error_closure: Option<PromiseClosure>,
}

impl JsonRequest {
    fn send(
        window: &web_sys::Window,
        url: &str,
        request_init: &web_sys::RequestInit,
        callback: JsonCallback,
    ) -> Box<JsonRequest> {
        let mut request = Box::new(JsonRequest {
            callback,
            done: false,
            _response_closure: None,
            content_closure: None,
            error_closure: None,
        });

        let request_pointer = &mut *request as *mut JsonRequest;

        let response_closure = PromiseClosure::new(move |v: JsValue| {
            let request = unsafe { &mut *request_pointer };
            request.handle_response(v);
        });

        let content_closure = PromiseClosure::new(move |v: JsValue| {
            let request = unsafe { &mut *request_pointer };
            request.finish(Ok(v));
        });

        let error_closure = PromiseClosure::new(move |_| {
            let request = unsafe { &mut *request_pointer };
            request.finish(Err("network error".to_string()));
        });

        let promise = window.fetch_with_str_and_init(url, request_init);

        let _ = promise.then2(&response_closure, &error_closure);

        request._response_closure = Some(response_closure);
        request.content_closure = Some(content_closure);
        request.error_closure = Some(error_closure);

        request
    }

    fn handle_response(&mut self, v: JsValue) {
        let Ok(response) = v.dyn_into::<web_sys::Response>()
        else {
            self.finish(Err("bad response".to_string()));
            return;
        };

        if !response.ok() {
            self.finish(Err(format!("status {}", response.status())));
            return;
        }

        let (Some(content_closure), Some(error_closure)) =
            (self.content_closure.as_ref(), self.error_closure.as_ref())
        else {
            return;
        };

        match response.json() {
            Ok(promise) => {
                let _ = promise.then2(content_closure, error_closure);
            },
            Err(_) => self.finish(Err("bad JSON".to_string())),
        }
    }

    fn finish(&mut self, result: Result<JsValue, String>) {
        if self.done {
            return;
        }

        // The closure that called this is still running so the
        // request can’t be dropped until later
        self.done = true;

        (self.callback)(result);
    }
}

fn load_puzzles(context: Context) {
    let window = context.window.clone();
    let mut context = Some(context);

    let mut request_init = web_sys::RequestInit::new();
    request_init.cache(web_sys::RequestCache::NoCache);

    let request = JsonRequest::send(
        &window,
        PUZZLES_URL,
        &request_init,
        Box::new(move |result: Result<JsValue, String>| {
            if let Some(context) = context.take() {
                puzzles_loaded(context, result);
            }
        }),
    );

    // Only one request is ever made so it can live as long as the page
    std::mem::forget(request);
}

fn puzzles_loaded(context: Context, result: Result<JsValue, String>) {
    let puzzles = match result.and_then(parse_puzzles) {
        Ok(puzzles) => puzzles,
        Err(e) => {
            show_error(&format!("Error loading puzzles: {}", e));
            return;
        },
    };

    if let Some(puzzle_num) = get_chosen_puzzle(&context) {
        match Strands::new(context, puzzles, puzzle_num) {
            Ok(strands) => {
                // Leak the main strands object so that it will live as
                // long as the web page
                std::mem::forget(strands);
            },
            Err(e) => show_error(&e),
        }
    } else {
        build_puzzle_list(&context, puzzles);
    }
}

struct Strands {
    context: Context,
    pointerdown_closure: Option<Closure::<dyn Fn(JsValue)>>,
    pointerup_closure: Option<Closure::<dyn Fn(JsValue)>>,
    pointermove_closure: Option<Closure::<dyn Fn(JsValue)>>,
    pointercancel_closure: Option<Closure::<dyn Fn(JsValue)>>,
    hint_closure: Option<Closure::<dyn Fn(JsValue)>>,
    game_contents: web_sys::HtmlElement,
    found_count: web_sys::HtmlElement,
    hint_button: web_sys::HtmlElement,
    hint_charge: web_sys::HtmlElement,
    current_word: web_sys::HtmlElement,
    word_message: web_sys::HtmlElement,
    game_grid: web_sys::SvgElement,
    found_trails: Option<web_sys::SvgElement>,
    puzzle: Puzzle,
    session: Session,
    letters: Vec<web_sys::SvgElement>,
    geometry: Geometry,
    // Requests to the word validation endpoint. Finished ones are
    // dropped the next time a word is sent.
    word_checks: Vec<Box<JsonRequest>>,
}

impl Strands {
    fn new(
        context: Context,
        puzzles: Vec<PuzzleData>,
        chosen_puzzle: usize,
    ) -> Result<Box<Strands>, String> {
        let game_contents = context.get_element("game-contents")?;
        let found_count = context.get_element("found-count")?;
        let hint_button = context.get_element("hint-button")?;
        let hint_charge = context.get_element("hint-charge")?;
        let current_word = context.get_element("current-word")?;
        let word_message = context.get_element("word-message")?;

        let Some(game_grid) = context.document.get_element_by_id("game-grid")
            .and_then(|c| c.dyn_into::<web_sys::SvgElement>().ok())
        else {
            return Err("failed to get game grid".to_string());
        };

        let Some(puzzle_data) = puzzles
            .into_iter()
            .nth(chosen_puzzle.wrapping_sub(1))
        else {
            return Err("chosen puzzle is not available".to_string());
        };

        let undo_policy = get_search_param(&context, "undo")
            .and_then(|s| s.parse::<UndoPolicy>().ok())
            .unwrap_or(UndoPolicy::PreviousCell);

        let rules = Rules {
            undo_policy,
            ..Rules::default()
        }.for_puzzle(&puzzle_data);

        let geometry = Geometry::new(&puzzle_data.grid, VIEWPORT_WIDTH);

        let puzzle = Puzzle::new(puzzle_data, rules)
            .map_err(|e| e.to_string())?;

        let mut strands = Box::new(Strands {
            context,
            pointerdown_closure: None,
            pointerup_closure: None,
            pointermove_closure: None,
            pointercancel_closure: None,
            hint_closure: None,
            game_contents,
            found_count,
            hint_button,
            hint_charge,
            current_word,
            word_message,
            game_grid,
            found_trails: None,
            session: Session::new(undo_policy),
            puzzle,
            geometry,
            letters: Vec::new(),
            word_checks: Vec::new(),
        });

        strands.create_letters()?;

        strands.create_closures();
        strands.set_up_hint_button();
        strands.update_title(chosen_puzzle);

        strands.flush_puzzle_changes();

        strands.remove_loading_class();
        strands.show_game_contents();

        Ok(strands)
    }

    fn create_closures(&mut self) {
        let strands_pointer = self as *mut Strands;

        let pointerdown_closure = Closure::<dyn Fn(JsValue)>::new(
            move |event: JsValue| {
                let strands = unsafe { &mut *strands_pointer };
                let event: web_sys::PointerEvent = event.dyn_into().unwrap();
                strands.handle_pointerdown_event(event);
            }
        );

        let _ = self.game_grid.add_event_listener_with_callback(
            "pointerdown",
            pointerdown_closure.as_ref().unchecked_ref(),
        );

        self.pointerdown_closure = Some(pointerdown_closure);

        let pointerup_closure = Closure::<dyn Fn(JsValue)>::new(
            move |event: JsValue| {
                let strands = unsafe { &mut *strands_pointer };
                let event: web_sys::PointerEvent = event.dyn_into().unwrap();
                strands.handle_pointerup_event(event);
            }
        );

        let _ = self.game_grid.add_event_listener_with_callback(
            "pointerup",
            pointerup_closure.as_ref().unchecked_ref(),
        );

        self.pointerup_closure = Some(pointerup_closure);

        let pointermove_closure = Closure::<dyn Fn(JsValue)>::new(
            move |event: JsValue| {
                let strands = unsafe { &mut *strands_pointer };
                let event: web_sys::PointerEvent = event.dyn_into().unwrap();
                strands.handle_pointermove_event(event);
            }
        );

        let _ = self.game_grid.add_event_listener_with_callback(
            "pointermove",
            pointermove_closure.as_ref().unchecked_ref(),
        );

        self.pointermove_closure = Some(pointermove_closure);

        let pointercancel_closure = Closure::<dyn Fn(JsValue)>::new(
            move |event: JsValue| {
                let strands = unsafe { &mut *strands_pointer };
                let event: web_sys::PointerEvent = event.dyn_into().unwrap();
                strands.handle_pointercancel_event(event);
            }
        );

        let _ = self.game_grid.add_event_listener_with_callback(
            "pointercancel",
            pointercancel_closure.as_ref().unchecked_ref(),
        );

        self.pointercancel_closure = Some(pointercancel_closure);
    }

    fn set_up_hint_button(&mut self) {
        let strands_pointer = self as *mut Strands;

        let hint_closure = Closure::<dyn Fn(JsValue)>::new(
            move |_event: JsValue| {
                let strands = unsafe { &mut *strands_pointer };
                strands.handle_hint();
            }
        );

        let _ = self.hint_button.add_event_listener_with_callback(
            "click",
            hint_closure.as_ref().unchecked_ref(),
        );

        self.hint_closure = Some(hint_closure);
    }

    fn create_svg_element(
        &self,
        name: &str,
    ) -> Result<web_sys::SvgElement, String> {
        self.context.document.create_element_ns(
            Some(SVG_NAMESPACE),
            name,
        ).ok().and_then(|c| c.dyn_into::<web_sys::SvgElement>().ok())
            .ok_or_else(|| format!("failed to create {} element", name))
    }

    fn create_letters(&mut self) -> Result<(), String> {
        // The trails are drawn underneath the letters
        let found_trails = self.create_svg_element("g")?;
        let _ = found_trails.set_attribute("class", "found-trails");
        let _ = self.game_grid.append_with_node_1(&found_trails);
        self.found_trails = Some(found_trails);

        let font_size = self.geometry.step * 0.5;
        let text_y_pos = font_size * 0.35;

        for cell in self.puzzle.grid().cells() {
            let g = self.create_svg_element("g")?;

            let (x_center, y_center) = self.geometry.convert_coords(cell);

            let _ = g.set_attribute("class", "letter");
            let _ = g.set_attribute(
                "transform",
                &format!("translate({}, {})", x_center, y_center),
            );
            g.set_id(&format!("letter-{}-{}", cell.row, cell.col));

            let circle = self.create_svg_element("circle")?;
            let _ = circle.set_attribute(
                "r",
                &self.geometry.radius.to_string(),
            );
            let _ = g.append_with_node_1(&circle);

            let text = self.create_svg_element("text")?;
            let _ = text.set_attribute("text-anchor", "middle");
            let _ = text.set_attribute("x", "0");
            let _ = text.set_attribute("y", &text_y_pos.to_string());
            let _ = text.set_attribute("font-size", &font_size.to_string());

            set_element_text(&text, &self.puzzle.grid().at(cell).to_string());

            let _ = g.append_with_node_1(&text);

            let _ = self.game_grid.append_with_node_1(&g);

            self.letters.push(g);
        }

        let _ = self.game_grid.set_attribute(
            "viewBox",
            &format!("0 0 {} {}", self.geometry.width, self.geometry.height),
        );

        Ok(())
    }

    fn show_game_contents(&self) {
        let _ = self.context.message.style().set_property("display", "none");
        let _ = self.game_contents.style().set_property("display", "block");
    }

    fn update_title(&self, chosen_puzzle: usize) {
        if let Some(element) = self.context.document.get_element_by_id("title")
        {
            let value = format!("Strands #{}", chosen_puzzle);
            set_element_text(&element, &value);
        }

        if let Some(element) = self.context.document.get_element_by_id("theme")
        {
            set_element_text(&element, self.puzzle.theme());
        }
    }

    fn remove_loading_class(&self) {
        if let Some(content) =
            self.context.document.get_element_by_id("content")
            .and_then(|c| c.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = content.class_list().remove_1("loading");
        }
    }

    fn trail_path_data(&self, path: &Path) -> String {
        let mut path_d = String::new();

        for (i, &cell) in path.cells().iter().enumerate() {
            let (x, y) = self.geometry.convert_coords(cell);

            write!(
                &mut path_d,
                "{} {},{} ",
                if i == 0 { 'M' } else { 'L' },
                x,
                y,
            ).unwrap();
        }

        path_d
    }

    fn create_trail(
        &self,
        path: &Path,
        class: &str,
    ) -> Result<web_sys::SvgElement, String> {
        let g = self.create_svg_element("g")?;
        let _ = g.set_attribute("class", class);

        if let Some(start) = path.cells().first() {
            let (cx, cy) = self.geometry.convert_coords(*start);

            let circle = self.create_svg_element("circle")?;
            let _ = circle.set_attribute(
                "r",
                &(self.geometry.radius * 0.4).to_string(),
            );
            let _ = circle.set_attribute("cx", &cx.to_string());
            let _ = circle.set_attribute("cy", &cy.to_string());

            let _ = g.append_with_node_1(&circle);
        }

        if path.len() > 1 {
            let line = self.create_svg_element("path")?;
            let _ = line.set_attribute("d", &self.trail_path_data(path));
            let _ = line.set_attribute(
                "stroke-width",
                &(self.geometry.radius * 0.3).to_string(),
            );

            let _ = g.append_with_node_1(&line);
        }

        Ok(g)
    }

    fn update_active_trail(&self) -> Result<(), String> {
        if let Some(old_trail) = self.context.document.get_element_by_id(
            ACTIVE_TRAIL_ID,
        ) {
            old_trail.remove();
        }

        let path = self.session.path();

        if path.is_empty() {
            return Ok(());
        }

        let trail = self.create_trail(path, "active-trail")?;
        trail.set_id(ACTIVE_TRAIL_ID);

        if let Some(found_trails) = self.found_trails.as_ref() {
            let _ = found_trails.append_with_node_1(&trail);
        }

        Ok(())
    }

    fn update_found_trails(&self) -> Result<(), String> {
        let Some(found_trails) = self.found_trails.as_ref()
        else {
            return Ok(());
        };

        clear_element(found_trails);

        for &entry_num in self.puzzle.state().found_entries() {
            let entry = &self.puzzle.entries()[entry_num];

            let Some(path) = entry.solution()
            else {
                continue;
            };

            let class = if entry.is_spangram() {
                "spangram-trail"
            } else {
                "found-trail"
            };

            let trail = self.create_trail(path, class)?;
            let _ = found_trails.append_with_node_1(&trail);
        }

        // The found trails were cleared along with the active one
        self.update_active_trail()
    }

    fn update_cells(&self) {
        let frame = self.puzzle.frame(&self.session);
        let grid = self.puzzle.grid();

        for cell in grid.cells() {
            let class_list = self.letters[grid.index(cell)].class_list();

            for (class, value) in [
                ("selected", frame.selected.contains(&cell)),
                ("found", frame.found.contains(&cell)),
                ("hinted", frame.hinted.contains(&cell)),
                ("spangram", frame.spangram.contains(&cell)),
            ] {
                let _ = if value {
                    class_list.add_1(class)
                } else {
                    class_list.remove_1(class)
                };
            }
        }
    }

    fn update_selection(&self) {
        let _ = self.update_active_trail();
        self.update_cells();

        let word = self.session.word(self.puzzle.grid());
        self.current_word.set_text_content(Some(&word));
    }

    fn animate_word_message(&self) {
        // Re-add the element to trigger the animation
        if let Some(parent) = self.word_message.parent_node() {
            self.word_message.remove();
            let _ = parent.append_child(&self.word_message);
        }
    }

    fn update_hint_button(&self) {
        let cost = self.puzzle.rules().hint_cost;

        let percent = if cost == 0 {
            100
        } else {
            self.puzzle.hint_charge() * 100 / cost
        };

        let _ = self.hint_charge.style().set_property(
            "width",
            &format!("{}%", percent),
        );

        let class_list = self.hint_button.class_list();

        let _ = if self.puzzle.can_use_hint() {
            class_list.add_1("ready")
        } else {
            class_list.remove_1("ready")
        };
    }

    fn flush_puzzle_changes(&mut self) {
        if let Some(n_found) = self.puzzle.changed_n_found_entries() {
            set_element_text(
                &self.found_count,
                &format!(
                    "{} of {} theme words found",
                    n_found,
                    self.puzzle.total_n_entries(),
                ),
            );
        }

        let mut hint_changed = false;

        if self.puzzle.changed_points().is_some() {
            hint_changed = true;
        }

        if self.puzzle.changed_cells() {
            self.update_cells();
            let _ = self.update_found_trails();
            hint_changed = true;
        }

        if hint_changed {
            self.update_hint_button();
        }

        if let Some(message) = self.puzzle.pending_word_message() {
            set_element_text(&self.word_message, message);
            self.animate_word_message();
        }

        if self.puzzle.pending_spangram() {
            let _ = self.game_contents.class_list().add_1("spangram-found");
        }

        if self.puzzle.pending_finish() {
            log::info!("all theme words found");
            let _ = self.game_contents.class_list().add_1("finished");
        }
    }

    fn submit_path(&mut self, path: Path) {
        match self.puzzle.resolve(&path) {
            Outcome::Pending(word) => self.check_word(word),
            outcome => log::debug!("{}: {:?}", path, outcome),
        }

        self.update_selection();
        self.flush_puzzle_changes();
    }

    fn check_word(&mut self, word: String) {
        self.word_checks.retain(|check| !check.done);

        let body = js_sys::Object::new();
        let _ = Reflect::set(&body, &"word".into(), &word.as_str().into());

        let headers = js_sys::Object::new();
        let _ = Reflect::set(
            &headers,
            &"Content-Type".into(),
            &"application/json".into(),
        );

        let Ok(body) = js_sys::JSON::stringify(&body)
        else {
            self.puzzle.oracle_verdict(
                &word,
                Err(OracleError::Request("bad request body".to_string())),
            );
            self.flush_puzzle_changes();
            return;
        };

        let body = JsValue::from(body);

        let mut request_init = web_sys::RequestInit::new();
        request_init
            .method("POST")
            .cache(web_sys::RequestCache::NoCache)
            .headers(&headers)
            .body(Some(&body));

        let strands_pointer = self as *mut Strands;

        let request = JsonRequest::send(
            &self.context.window,
            VALIDATE_WORD_URL,
            &request_init,
            Box::new(move |result: Result<JsValue, String>| {
                let strands = unsafe { &mut *strands_pointer };
                strands.word_checked(&word, result);
            }),
        );

        self.word_checks.push(request);
    }

    fn word_checked(&mut self, word: &str, result: Result<JsValue, String>) {
        let verdict = result.and_then(|v| {
            Reflect::get(&v, &"valid".into())
                .ok()
                .and_then(|v| v.as_bool())
                .ok_or_else(|| "missing valid field".to_string())
        }).map_err(OracleError::Request);

        self.puzzle.oracle_verdict(word, verdict);
        self.flush_puzzle_changes();
    }

    fn position_for_event(
        &self,
        event: &web_sys::PointerEvent,
    ) -> Option<Cell> {
        let Some(target) = event.target()
        else {
            return None;
        };

        let Ok(element) = target.dyn_into::<web_sys::SvgElement>()
        else {
            return None;
        };

        if element != self.game_grid {
            return None;
        }

        let pointer_x = event.offset_x();
        let pointer_y = event.offset_y();
        let client_width = element.client_width();

        // Convert the pointer coordinates to the viewBox space of the
        // game grid
        let grid_x = pointer_x as f32 * VIEWPORT_WIDTH / client_width as f32;
        let grid_y = pointer_y as f32 * VIEWPORT_WIDTH / client_width as f32;

        let cell = self.geometry.reverse_coords(grid_x, grid_y);

        self.puzzle.grid().contains(cell).then_some(cell)
    }

    fn handle_pointerdown_event(&mut self, event: web_sys::PointerEvent) {
        if !event.is_primary() || event.button() != 0 {
            return;
        }

        event.prevent_default();

        let Some(position) = self.position_for_event(&event)
        else {
            return;
        };

        if self.session.start(event.pointer_id(), position) {
            let _ = self.game_grid.set_pointer_capture(event.pointer_id());
            self.update_selection();
        }
    }

    fn handle_pointerup_event(&mut self, event: web_sys::PointerEvent) {
        if !event.is_primary() || event.button() != 0 {
            return;
        }

        event.prevent_default();

        let Some(path) = self.session.finish(event.pointer_id())
        else {
            return;
        };

        let _ = self.game_grid.release_pointer_capture(event.pointer_id());

        self.submit_path(path);
    }

    fn handle_pointermove_event(&mut self, event: web_sys::PointerEvent) {
        if !event.is_primary() {
            return;
        }

        event.prevent_default();

        let Some(position) = self.position_for_event(&event)
        else {
            return;
        };

        if self.session.extend(event.pointer_id(), position) != Step::Unchanged
        {
            self.update_selection();
        }
    }

    fn handle_pointercancel_event(&mut self, event: web_sys::PointerEvent) {
        if !event.is_primary() {
            return;
        }

        if self.session.cancel(event.pointer_id()) {
            self.update_selection();
        }
    }

    fn handle_hint(&mut self) {
        match self.puzzle.use_hint() {
            Ok(entry_num) => {
                log::debug!(
                    "hint for {}",
                    self.puzzle.entries()[entry_num].word(),
                );
            },
            Err(HintError::InsufficientPoints) => {
                log::debug!("not enough points for a hint");
            },
            Err(e) => log::warn!("{}", e),
        }

        self.flush_puzzle_changes();
    }
}

fn get_property(data: &JsValue, key: &str) -> Result<JsValue, String> {
    Reflect::get(data, &key.into())
        .map_err(|_| format!("Error getting {}", key))
}

fn get_string(data: &JsValue, key: &str) -> Result<String, String> {
    get_property(data, key)?
        .as_string()
        .ok_or_else(|| format!("{} is not a string", key))
}

fn get_array(data: &JsValue, key: &str) -> Result<js_sys::Array, String> {
    TryInto::<js_sys::Array>::try_into(get_property(data, key)?)
        .map_err(|_| format!("{} is not an array", key))
}

// Missing numbers are left for the rules to fill in
fn get_optional_number(data: &JsValue, key: &str) -> Option<f64> {
    get_property(data, key).ok().and_then(|v| v.as_f64())
}

fn parse_cell(value: JsValue) -> Result<Cell, String> {
    let Ok(pair) = TryInto::<js_sys::Array>::try_into(value)
    else {
        return Err("Solution cell is not an array".to_string());
    };

    match (pair.get(0).as_f64(), pair.get(1).as_f64(), pair.length()) {
        (Some(row), Some(col), 2) => Ok(Cell::new(row as u32, col as u32)),
        _ => Err("Solution cell is not a pair of numbers".to_string()),
    }
}

fn parse_entry(data: JsValue) -> Result<EntryData, String> {
    let word = get_string(&data, "word")?.to_uppercase();

    let solution = get_property(&data, "solution")?;

    let solution = if solution.is_null() || solution.is_undefined() {
        None
    } else {
        let Ok(cells) = TryInto::<js_sys::Array>::try_into(solution)
        else {
            return Err(format!("Solution for {} is not an array", word));
        };

        let cells = cells.iter()
            .map(parse_cell)
            .collect::<Result<Vec<Cell>, String>>()?;

        Some(
            Path::from_cells(cells).map_err(|e| format!("{}: {}", word, e))?
        )
    };

    let spangram = get_property(&data, "spangram")?
        .as_bool()
        .unwrap_or(false);

    Ok(EntryData { word, solution, spangram })
}

fn parse_puzzle(data: JsValue) -> Result<PuzzleData, String> {
    let theme = get_string(&data, "theme")?;

    let rows = get_array(&data, "grid")?
        .iter()
        .map(|row| row.as_string().ok_or_else(|| {
            "Grid row is not a string".to_string()
        }))
        .collect::<Result<Vec<String>, String>>()?;

    let grid = Grid::from_rows(rows).map_err(|e| e.to_string())?;

    let entries = get_array(&data, "entries")?
        .iter()
        .map(parse_entry)
        .collect::<Result<Vec<EntryData>, String>>()?;

    Ok(PuzzleData {
        theme,
        grid,
        entries,
        min_word_length: get_optional_number(&data, "minLength")
            .map(|n| n as usize),
        hint_cost: get_optional_number(&data, "hintCost").map(|n| n as u32),
    })
}

fn parse_puzzles(data: JsValue) -> Result<Vec<PuzzleData>, String> {
    let Ok(puzzle_array) = TryInto::<js_sys::Array>::try_into(data)
    else {
        return Err("Error getting puzzle array".to_string());
    };

    puzzle_array.iter().map(parse_puzzle).collect()
}

fn clear_element(element: &web_sys::Element) {
    while let Some(child) = element.first_child() {
        let _ = element.remove_child(&child);
    }
}

fn set_element_text(element: &web_sys::Element, text: &str) {
    clear_element(element);

    if let Some(document) = element.owner_document() {
        let text = document.create_text_node(text);
        let _ = element.append_with_node_1(&text);
    }
}

fn get_search_param(context: &Context, name: &str) -> Option<String> {
    let location = context.document.location()?;
    let search = location.search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;

    params.get(name)
}

fn get_chosen_puzzle(context: &Context) -> Option<usize> {
    get_search_param(context, "p")?.parse::<usize>().ok()
}

fn build_puzzle_list(context: &Context, puzzles: Vec<PuzzleData>) {
    let Some(puzzle_list) = context.document.get_element_by_id("puzzle-list")
    else {
        show_error("Error getting puzzle list");
        return;
    };

    let Some(path_name) = context.document.location()
        .and_then(|location| location.pathname().ok())
    else {
        show_error("Error getting location path name");
        return;
    };

    for (puzzle_num, puzzle) in puzzles.into_iter().enumerate() {
        let Ok(li) = context.document.create_element("li")
        else {
            continue;
        };

        let Ok(a) = context.document.create_element("a")
        else {
            continue;
        };

        set_element_text(&a, &format!("Puzzle {}", puzzle_num + 1));

        let _ = a.set_attribute(
            "href",
            &format!("{}?p={}", path_name, puzzle_num + 1),
        );

        let _ = li.append_with_node_1(&a);

        let detail = context.document.create_text_node(
            &format!(" – {}", puzzle.theme),
        );

        let _ = li.append_with_node_1(&detail);

        let _ = puzzle_list.append_with_node_1(&li);
    }

    let _ = context.message.style().set_property("display", "none");

    if let Some(puzzle_selector) = context.document.get_element_by_id(
        "puzzle-selector",
    ).and_then(|ps| ps.dyn_into::<web_sys::HtmlElement>().ok()) {
        let _ = puzzle_selector.style().set_property("display", "block");
    };
}

#[wasm_bindgen]
pub fn init_strands() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }

    let context = match Context::new() {
        Ok(c) => c,
        Err(e) => {
            show_error(&e);
            return;
        }
    };

    load_puzzles(context);
}
