use std::io::{Cursor, Write};
use std::sync::Once;

use zip::write::SimpleFileOptions;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Assemble an in-memory KMZ from (path, bytes) entries.
pub fn build_kmz(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, bytes) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(bytes).expect("write entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// A point placemark whose icon references an embedded image by path.
pub const PINNED_POINT_KML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n\
  <Document>\n\
    <Placemark>\n\
      <name>Kamp Alani</name>\n\
      <Style><IconStyle><Icon><href>icons/pin.png</href></Icon></IconStyle></Style>\n\
      <Point><coordinates>29.05,41.02,0</coordinates></Point>\n\
    </Placemark>\n\
  </Document>\n\
</kml>\n";

/// A two-placemark document: a named point and a styled track.
pub const TRAIL_KML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n\
  <Document>\n\
    <Style id=\"track\"><LineStyle><color>ff0000ff</color><width>4</width></LineStyle></Style>\n\
    <Placemark>\n\
      <name>Baslangic</name>\n\
      <Point><coordinates>29.0,41.0</coordinates></Point>\n\
    </Placemark>\n\
    <Placemark>\n\
      <name>Parkur</name>\n\
      <styleUrl>#track</styleUrl>\n\
      <LineString><coordinates>29.0,41.0 29.1,41.1 29.2,41.2</coordinates></LineString>\n\
    </Placemark>\n\
  </Document>\n\
</kml>\n";

/// Builds a simple square-polygon document covering the given bounds.
pub fn square_kml(name: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> String {
    format!(
        "<kml><Document><Placemark><name>{name}</name><Polygon><outerBoundaryIs><LinearRing>\
         <coordinates>{x0},{y0} {x1},{y0} {x1},{y1} {x0},{y1} {x0},{y0}</coordinates>\
         </LinearRing></outerBoundaryIs></Polygon></Placemark></Document></kml>"
    )
}
