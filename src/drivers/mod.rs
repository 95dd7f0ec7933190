// Hardware drivers, board-independent.
//
// Both drivers sit on embedded-hal OutputPin; only the pin numbers and
// wiring (in board/) are board-specific.

pub mod led;
pub mod power;
