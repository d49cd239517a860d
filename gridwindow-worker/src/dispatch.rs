use gridwindow::{ResizeMeasurement, Viewport, compute_buffer_meta_for, resolve_visible_items};

use crate::{RejectReason, ResultCache, WindowRequest, WindowResponse};

fn check_measurement(measurement: &ResizeMeasurement) -> Result<(), RejectReason> {
    if measurement.is_valid() {
        Ok(())
    } else {
        Err(RejectReason::InvalidMeasurement)
    }
}

fn check_buffer_inputs(
    measurement: &ResizeMeasurement,
    multiplier: f64,
    viewport: &Viewport,
) -> Result<(), RejectReason> {
    check_measurement(measurement)?;
    if !viewport.is_valid() {
        return Err(RejectReason::InvalidViewport);
    }
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(RejectReason::InvalidMultiplier);
    }
    Ok(())
}

/// Checks a request against the engine's preconditions.
///
/// The engine itself never validates; degenerate inputs must be stopped here.
pub fn validate(request: &WindowRequest) -> Result<(), RejectReason> {
    match request {
        WindowRequest::BufferMeta {
            measurement,
            multiplier,
            viewport,
            ..
        }
        | WindowRequest::Window {
            measurement,
            multiplier,
            viewport,
            ..
        } => check_buffer_inputs(measurement, *multiplier, viewport),
        WindowRequest::Items { measurement, .. } => check_measurement(measurement),
    }
}

/// Executes one request, consulting and filling `cache`.
///
/// Shared by every engine so that in-thread and background execution give identical answers.
pub fn dispatch(request: &WindowRequest, cache: &mut ResultCache) -> WindowResponse {
    if let Err(reason) = validate(request) {
        vwarn!(%reason, "rejecting window request");
        return WindowResponse::Rejected(reason);
    }

    match *request {
        WindowRequest::BufferMeta {
            space,
            ref measurement,
            multiplier,
            viewport,
        } => WindowResponse::BufferMeta(cache.buffer_meta_or_insert_with(
            space,
            measurement,
            multiplier,
            viewport,
            || compute_buffer_meta_for(space, measurement, multiplier, viewport),
        )),
        WindowRequest::Items {
            buffer,
            ref measurement,
            collection_length,
        } => WindowResponse::Items(cache.items_or_insert_with(
            buffer,
            measurement,
            collection_length,
            || resolve_visible_items(buffer, measurement, collection_length),
        )),
        WindowRequest::Window {
            space,
            ref measurement,
            multiplier,
            viewport,
            collection_length,
        } => {
            let buffer = cache.buffer_meta_or_insert_with(
                space,
                measurement,
                multiplier,
                viewport,
                || compute_buffer_meta_for(space, measurement, multiplier, viewport),
            );
            let items = cache.items_or_insert_with(buffer, measurement, collection_length, || {
                resolve_visible_items(buffer, measurement, collection_length)
            });
            WindowResponse::Window { buffer, items }
        }
    }
}
