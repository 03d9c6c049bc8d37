use crate::window::geometry_from_physical;

use shell_state::WindowGeometry;

use tauri::PhysicalSize;

#[test]
fn test_geometry_from_physical_unscaled() {
    let geometry = geometry_from_physical(PhysicalSize::new(1024, 768), 1.0);

    assert_eq!(geometry, WindowGeometry::new(1024, 768));
}

#[test]
fn test_geometry_from_physical_hidpi_stored_logical() {
    let geometry = geometry_from_physical(PhysicalSize::new(1600, 1200), 2.0);

    assert_eq!(geometry, WindowGeometry::new(800, 600));
}

#[test]
fn test_geometry_from_physical_fractional_scale_rounded() {
    let geometry = geometry_from_physical(PhysicalSize::new(1001, 751), 1.25);

    assert_eq!(geometry, WindowGeometry::new(801, 601));
}

#[test]
fn test_geometry_from_physical_minimized_zero_size_rejected() {
    assert_eq!(geometry_from_physical(PhysicalSize::new(0, 0), 1.0), None);
}
