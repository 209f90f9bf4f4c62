//! IPC message dispatch — parse s-expressions and route to handlers.

use anyhow::{bail, Context};
use lexpr::Value;
use tracing::{debug, warn};

use crate::gesture::GestureEngine;
use crate::hand::{HandFrame, Point2D, Point3D};

/// Parse an s-expression message and dispatch to the appropriate handler.
/// Returns an optional response string (s-expression).
pub fn handle_message(engine: &mut GestureEngine, raw: &str) -> Option<String> {
    let value = match lexpr::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("malformed s-expression: {}", e);
            return Some(error_response(0, &format!("malformed s-expression: {e}")));
        }
    };

    let msg_type = get_keyword(&value, "type");
    let msg_id = get_int(&value, "id").unwrap_or(0);

    match msg_type.as_deref() {
        Some("ping") => Some(format!("(:type :response :id {} :status :ok :pong t)", msg_id)),
        Some("frame") => handle_frame(engine, msg_id, &value),
        Some("no-hand") => handle_no_hand(engine, msg_id, &value),
        Some("gesture-status") => handle_gesture_status(engine, msg_id),
        Some("gesture-config") => handle_gesture_config(engine, msg_id),
        Some("gesture-reset") => handle_gesture_reset(engine, msg_id),
        Some(other) => {
            debug!("unknown message type: {}", other);
            Some(error_response(msg_id, &format!("unknown message type: {other}")))
        }
        None => Some(error_response(msg_id, "missing :type")),
    }
}

// ── Frame handlers ─────────────────────────────────────────

fn handle_frame(engine: &mut GestureEngine, msg_id: i64, value: &Value) -> Option<String> {
    let now_ms = match frame_time(engine, value) {
        Ok(t) => t,
        Err(e) => return Some(error_response(msg_id, &e.to_string())),
    };
    let frame = match parse_frame(value) {
        Ok(f) => f,
        Err(e) => {
            warn!(msg_id, "rejected hand frame: {:#}", e);
            return Some(error_response(msg_id, &format!("{e:#}")));
        }
    };

    let state = engine.process(Some(&frame), now_ms);
    Some(format!(
        "(:type :response :id {} :status :ok :gesture {})",
        msg_id,
        state.to_sexp()
    ))
}

fn handle_no_hand(engine: &mut GestureEngine, msg_id: i64, value: &Value) -> Option<String> {
    let now_ms = match frame_time(engine, value) {
        Ok(t) => t,
        Err(e) => return Some(error_response(msg_id, &e.to_string())),
    };
    let state = engine.process(None, now_ms);
    Some(format!(
        "(:type :response :id {} :status :ok :gesture {})",
        msg_id,
        state.to_sexp()
    ))
}

/// Read `:time`, rejecting non-finite values and timestamps earlier than
/// the previous frame.
fn frame_time(engine: &GestureEngine, value: &Value) -> anyhow::Result<f64> {
    let Some(now_ms) = get_float(value, "time") else {
        bail!("missing :time");
    };
    // `f64::from_str` accepts "nan" and "inf".
    if !now_ms.is_finite() {
        bail!("non-finite :time: {now_ms}");
    }
    if let Some(last) = engine.session().velocity().last_time_ms() {
        if now_ms < last {
            bail!("timestamp went backwards: {now_ms} < {last}");
        }
    }
    Ok(now_ms)
}

/// Build a `HandFrame` from `:landmarks (x0 y0 ...)` and optional
/// `:world (x0 y0 z0 ...)`.
fn parse_frame(value: &Value) -> anyhow::Result<HandFrame> {
    let landmarks = get_value(value, "landmarks").context("missing :landmarks")?;
    let coords = numbers(landmarks).context("invalid :landmarks")?;
    if coords.len() % 2 != 0 {
        bail!("odd coordinate count in :landmarks: {}", coords.len());
    }
    let points: Vec<Point2D> = coords
        .chunks_exact(2)
        .map(|c| Point2D::new(c[0], c[1]))
        .collect();
    let frame = HandFrame::from_points(&points)?;

    let Some(world) = get_value(value, "world") else {
        return Ok(frame);
    };
    let coords = numbers(world).context("invalid :world")?;
    if coords.len() % 3 != 0 {
        bail!("coordinate count in :world not a multiple of 3: {}", coords.len());
    }
    let world: Vec<Point3D> = coords
        .chunks_exact(3)
        .map(|c| Point3D {
            x: c[0],
            y: c[1],
            z: c[2],
        })
        .collect();
    frame.with_world_points(&world)
}

/// Every leaf of a list as a number.
fn numbers(value: &Value) -> anyhow::Result<Vec<f32>> {
    flatten_list(value)
        .into_iter()
        .map(|v| match v {
            Value::Number(n) => n
                .as_f64()
                .map(|f| f as f32)
                .with_context(|| format!("not representable as float: {n}")),
            other => bail!("expected number, got {other}"),
        })
        .collect()
}

// ── Status handlers ────────────────────────────────────────

fn handle_gesture_status(engine: &mut GestureEngine, msg_id: i64) -> Option<String> {
    Some(format!(
        "(:type :response :id {} :status :ok :gesture {})",
        msg_id,
        engine.status_sexp()
    ))
}

fn handle_gesture_config(engine: &mut GestureEngine, msg_id: i64) -> Option<String> {
    Some(format!(
        "(:type :response :id {} :status :ok :config {})",
        msg_id,
        engine.config().config_sexp()
    ))
}

fn handle_gesture_reset(engine: &mut GestureEngine, msg_id: i64) -> Option<String> {
    engine.reset();
    Some(ok_response(msg_id))
}

// ── Helpers ────────────────────────────────────────────────

fn ok_response(id: i64) -> String {
    format!("(:type :response :id {} :status :ok)", id)
}

fn error_response(id: i64, reason: &str) -> String {
    format!(
        "(:type :response :id {} :status :error :reason \"{}\")",
        id,
        escape_string(reason)
    )
}

/// Escape a string for s-expression output.
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Find the value following `:key` in an s-expression plist.
/// Handles both `Value::Keyword("key")` (elisp parser) and
/// `Value::Symbol(":key")` (default parser) forms.
fn get_value<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let prefixed = format!(":{}", key);
    let mut current = value;
    while let Value::Cons(pair) = current {
        let is_key = match pair.car() {
            Value::Keyword(k) => k.as_ref() == key,
            Value::Symbol(s) => s.as_ref() == prefixed,
            _ => false,
        };
        if is_key {
            return match pair.cdr() {
                Value::Cons(next) => Some(next.car()),
                _ => None,
            };
        }
        current = pair.cdr();
    }
    None
}

/// Extract a keyword value from an s-expression plist as a string.
fn get_keyword(value: &Value, key: &str) -> Option<String> {
    let val = get_value(value, key)?;
    Some(match val {
        Value::Keyword(v) => v.to_string(),
        Value::Symbol(v) => {
            let s = v.to_string();
            s.strip_prefix(':').unwrap_or(&s).to_string()
        }
        Value::String(v) => v.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => (if *b { "t" } else { "nil" }).to_string(),
        Value::Null => "nil".to_string(),
        _ => val.to_string(),
    })
}

/// Extract an integer value from an s-expression plist.
fn get_int(value: &Value, key: &str) -> Option<i64> {
    get_keyword(value, key).and_then(|s| s.parse().ok())
}

/// Extract a floating-point value from an s-expression plist.
fn get_float(value: &Value, key: &str) -> Option<f64> {
    get_keyword(value, key).and_then(|s| s.parse().ok())
}

/// Flatten a possibly nested list/cons structure into a Vec of leaf values.
fn flatten_list(value: &Value) -> Vec<&Value> {
    let mut result = Vec::new();
    fn walk<'a>(v: &'a Value, out: &mut Vec<&'a Value>) {
        match v {
            Value::Cons(pair) => {
                walk(pair.car(), out);
                walk(pair.cdr(), out);
            }
            Value::Null => {} // end of list
            other => out.push(other),
        }
    }
    walk(value, &mut result);
    result
}

/// Render a hand frame as a `:frame` message, the inverse of `parse_frame`.
pub fn format_frame(id: i64, time_ms: f64, frame: &HandFrame) -> String {
    let mut coords = String::new();
    for (i, p) in frame.points().iter().enumerate() {
        if i > 0 {
            coords.push(' ');
        }
        coords.push_str(&format!("{:.4} {:.4}", p.x, p.y));
    }
    format!(
        "(:type :frame :id {} :time {:.1} :landmarks ({}))",
        id, time_ms, coords
    )
}
