use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Grid, GridLayout, MdpError};

/// Read a [`GridLayout`] document. Walls, goals and traps may be omitted.
pub fn load_layout_yaml(path: impl AsRef<Path>) -> Result<GridLayout, MdpError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_yaml::from_reader(reader)?)
}

/// Read a layout document and lay out its cells.
pub fn grid_from_yaml(path: impl AsRef<Path>) -> Result<Grid, MdpError> {
    load_layout_yaml(path).map(|layout| layout.to_grid())
}

/// Write `layout` as YAML, replacing any existing file.
pub fn save_layout_yaml(path: impl AsRef<Path>, layout: &GridLayout) -> Result<(), MdpError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(&mut writer, layout)?;
    writer.flush()?;
    Ok(())
}
