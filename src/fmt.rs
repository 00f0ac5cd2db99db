//! Logging shims: forward to `defmt` when the `defmt` feature is on, compile to nothing otherwise.
#![macro_use]

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($(&$x),*);
    }};
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($(&$x),*);
    }};
}

// Wraps a `Display` value so `defmt` can log it.
#[cfg(feature = "defmt")]
macro_rules! display {
    ($e:expr) => {
        ::defmt::Display2Format(&$e)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! display {
    ($e:expr) => {
        &$e
    };
}
