//! Single owned map widget handle
//!
//! The page shows one map with one draggable marker. [`MapHandle`] creates
//! it at most once and afterwards only moves the marker.

use crate::models::{Coordinates, LocationPoint};

/// Zoom level of the initial map view
pub const DEFAULT_ZOOM: u8 = 13;

/// Rendering backend behind the handle (Leaflet in the browser)
pub trait MapBackend {
    type Map;
    type Error;

    /// Create the map centred on `center` with a draggable marker on it
    fn create(&self, center: Coordinates, zoom: u8) -> Result<Self::Map, Self::Error>;

    /// Move the existing marker and recentre the view
    fn move_marker(&self, map: &Self::Map, to: Coordinates) -> Result<(), Self::Error>;
}

pub struct MapHandle<B: MapBackend> {
    backend: B,
    map: Option<B::Map>,
    zoom: u8,
}

impl<B: MapBackend> MapHandle<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            map: None,
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.map.is_some()
    }

    pub fn map(&self) -> Option<&B::Map> {
        self.map.as_ref()
    }

    /// Create the map if it does not exist yet.
    ///
    /// Returns `Ok(true)` when a map was created and `Ok(false)` when one
    /// already existed, in which case nothing happens.
    pub fn initialize(&mut self, point: &LocationPoint) -> Result<bool, B::Error> {
        if self.map.is_some() {
            return Ok(false);
        }
        let map = self.backend.create(point.coordinates(), self.zoom)?;
        self.map = Some(map);
        Ok(true)
    }

    /// Move the marker of an existing map. Returns `Ok(false)` before
    /// [`initialize`](Self::initialize) has run.
    pub fn update_position(&self, point: &LocationPoint) -> Result<bool, B::Error> {
        match &self.map {
            Some(map) => {
                self.backend.move_marker(map, point.coordinates())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct CountingBackend {
        created: Cell<u32>,
        moves: RefCell<Vec<Coordinates>>,
    }

    impl MapBackend for &CountingBackend {
        type Map = u32;
        type Error = ();

        fn create(&self, _center: Coordinates, zoom: u8) -> Result<u32, ()> {
            assert_eq!(zoom, DEFAULT_ZOOM);
            self.created.set(self.created.get() + 1);
            Ok(self.created.get())
        }

        fn move_marker(&self, _map: &u32, to: Coordinates) -> Result<(), ()> {
            self.moves.borrow_mut().push(to);
            Ok(())
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let backend = CountingBackend::default();
        let mut handle = MapHandle::new(&backend);
        let point = LocationPoint::default_india();

        assert_eq!(handle.initialize(&point), Ok(true));
        assert_eq!(handle.initialize(&LocationPoint::new(1.0, 2.0, "other")), Ok(false));
        assert_eq!(backend.created.get(), 1);
        assert_eq!(handle.map(), Some(&1));
    }

    #[test]
    fn test_update_before_initialize_is_noop() {
        let backend = CountingBackend::default();
        let handle = MapHandle::new(&backend);
        assert_eq!(handle.update_position(&LocationPoint::default_india()), Ok(false));
        assert!(backend.moves.borrow().is_empty());
    }

    #[test]
    fn test_update_moves_existing_marker() {
        let backend = CountingBackend::default();
        let mut handle = MapHandle::new(&backend);
        handle.initialize(&LocationPoint::default_india()).unwrap();

        assert_eq!(handle.update_position(&LocationPoint::new(10.0, 20.0, "x")), Ok(true));
        assert_eq!(*backend.moves.borrow(), vec![Coordinates::new(10.0, 20.0)]);
        assert_eq!(backend.created.get(), 1);
    }
}
