//! Built-in scenario: Leon, Iloilo.
//!
//! Nine barangays with Poblacion as the evacuation centre.  Every other
//! barangay has a two-way road to Poblacion only (a star), and the recorded
//! path lengths are the surveyed alternatives per barangay.  The data goes
//! through the same CSV readers as on-disk configuration.

use std::io::Cursor;

use ev_network::EvacNetworkBuilder;

use crate::topology::{read_distances, read_roads, read_villages, Topology};
use crate::DataResult;

pub const CENTRE: &str = "Poblacion";

pub const VILLAGES_CSV: &str = "\
name,lat,lon,centre\n\
Poblacion,10.78485548380185,122.3837072230239,true\n\
Bobon,10.89540587344769,122.2974269217951,\n\
Gines,10.85687388394953,122.3416150076236,\n\
Barangbang,10.81689999087547,122.3308342242847,\n\
Carolina,10.79669908350887,122.3520502173874,\n\
Lonoc,10.78288182778105,122.3416334769778,\n\
Bacolod,10.87712542341233,122.3069941457462,\n\
Binolbog,10.78306359215453,122.3340049830963,\n\
Ingay,10.843979902549595,122.2920820324205,\n\
";

pub const ROADS_CSV: &str = "\
from,to\n\
Poblacion,Bobon\n\
Poblacion,Gines\n\
Poblacion,Barangbang\n\
Poblacion,Carolina\n\
Poblacion,Lonoc\n\
Poblacion,Bacolod\n\
Poblacion,Binolbog\n\
Poblacion,Ingay\n\
";

pub const DISTANCES_CSV: &str = "\
village,distance_km\n\
Bobon,24.4\n\
Bobon,29.1\n\
Bobon,25.6\n\
Gines,12.7\n\
Gines,15.9\n\
Gines,18.1\n\
Bacolod,19.9\n\
Bacolod,24.7\n\
Bacolod,20.0\n\
Lonoc,7.71\n\
Lonoc,10.6\n\
Binolbog,8.74\n\
Binolbog,9.8\n\
Barangbang,12.2\n\
Barangbang,17.0\n\
Carolina,7.06\n\
Carolina,7.23\n\
Ingay,24.0\n\
Ingay,28.7\n\
";

/// The Leon topology, unresolved.
pub fn topology() -> DataResult<Topology> {
    Ok(Topology {
        villages:  read_villages(Cursor::new(VILLAGES_CSV), "leon villages")?,
        roads:     read_roads(Cursor::new(ROADS_CSV), "leon roads")?,
        distances: read_distances(Cursor::new(DISTANCES_CSV), "leon distances")?,
    })
}

/// A network builder for Leon with no segment samples yet.
pub fn builder() -> DataResult<EvacNetworkBuilder> {
    topology()?.into_builder()
}
