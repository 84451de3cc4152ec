use std::io::{self, Write};

use crate::app::Placement;

/// Write the placement table as CSV.
///
/// Columns: kind, id, name, x, y, z, radius, visible
pub fn write_placements<W: Write>(writer: &mut W, placements: &[Placement]) -> io::Result<()> {
    writeln!(writer, "kind,id,name,x,y,z,radius,visible")?;

    for p in placements {
        writeln!(
            writer,
            "{},{},{},{:.4},{:.4},{:.4},{:.4},{}",
            p.kind,
            escape(&p.id),
            escape(&p.name),
            p.position[0], p.position[1], p.position[2],
            p.radius,
            p.visible,
        )?;
    }

    Ok(())
}

/// Write the placement table to a CSV file at the given path.
pub fn write_placements_file(path: &str, placements: &[Placement]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_placements(&mut file, placements)
}

/// Quote fields containing separators or quotes.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
