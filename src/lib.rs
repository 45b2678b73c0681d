/*!
Real-time driver for a browser-presented particle fluid visualization. The
physics runs inside an opaque pre-built engine; this crate advances simulated
time in fixed steps decoupled from the display refresh rate, marshals the
engine's flat buffers into per-particle and per-cell samples, and maps them to
visual attributes. The `platform::web` module wires the driver to
`requestAnimationFrame` when compiling for `wasm32-unknown-unknown`.
*/

mod driver;
mod platform;

pub use driver::*;
