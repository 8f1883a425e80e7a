//! Behaviour-driven tests for importing OSM nodes as campus POS.

use std::sync::Arc;

use campus_coffee::domain::ports::{FixtureOsmNodeSource, PosService};
use campus_coffee::domain::{
    CampusType, Error, ErrorCode, OsmNode, OsmNodeId, Pos, PosCommandService, PosType,
    RequiredField,
};
use campus_coffee::outbound::memory::InMemoryPosRepository;
use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tokio::runtime::Runtime;

const RADA_NODE: OsmNodeId = OsmNodeId::new(5_589_879_349);
const BAKERY_NODE: OsmNodeId = OsmNodeId::new(1_001);
const NO_CITY_NODE: OsmNodeId = OsmNodeId::new(1_002);
const UNKNOWN_NODE: OsmNodeId = OsmNodeId::new(9_999);

type ImportService = PosCommandService<FixtureOsmNodeSource, InMemoryPosRepository>;

fn rada_node() -> OsmNode {
    OsmNode::new(RADA_NODE)
        .with_tag("name:de", "Rada Coffee &amp; Rösterei")
        .with_tag("amenity", "cafe")
        .with_tag("addr:street", "Untere Straße")
        .with_tag("addr:housenumber", "21")
        .with_tag("addr:postcode", "69117")
        .with_tag("addr:city", "Heidelberg")
}

fn bakery_node() -> OsmNode {
    OsmNode::new(BAKERY_NODE)
        .with_tag("name", "Bäckerei am Bismarckplatz")
        .with_tag("description", "Brezeln &amp; Kaffee")
        .with_tag("amenity", "Bakery")
        .with_tag("addr:street", "Bergheimer Straße")
        .with_tag("addr:housenumber", "1a")
        .with_tag("addr:postcode", "69115")
        .with_tag("addr:city", "Heidelberg")
}

fn node_without_city() -> OsmNode {
    OsmNode::new(NO_CITY_NODE)
        .with_tag("name", "Nameless Street Kiosk")
        .with_tag("amenity", "cafe")
        .with_tag("addr:street", "Im Neuenheimer Feld")
        .with_tag("addr:housenumber", "205")
        .with_tag("addr:postcode", "69120")
}

#[derive(Clone)]
struct RuntimeHandle(Arc<Runtime>);

#[derive(Default, ScenarioState)]
struct ImportWorld {
    runtime: Slot<RuntimeHandle>,
    service: Slot<Arc<ImportService>>,
    last_result: Slot<Result<Pos, Error>>,
}

impl ImportWorld {
    fn setup_service(&self) {
        let runtime = Runtime::new().expect("create runtime");
        let source = FixtureOsmNodeSource::default()
            .with_node(rada_node())
            .with_node(bakery_node())
            .with_node(node_without_city());
        let repository = InMemoryPosRepository::new(Arc::new(DefaultClock));

        self.runtime.set(RuntimeHandle(Arc::new(runtime)));
        self.service
            .set(Arc::new(PosCommandService::new(Arc::new(source), Arc::new(repository))));
    }

    fn handles(&self) -> (Arc<Runtime>, Arc<ImportService>) {
        let runtime = self.runtime.get().expect("runtime");
        let service = self.service.get().expect("service");
        (runtime.0, service)
    }

    fn import(&self, node_id: OsmNodeId) {
        let (runtime, service) = self.handles();
        let result = runtime.block_on(service.import_from_osm_node(node_id));
        self.last_result.set(result);
    }

    fn stored(&self) -> Vec<Pos> {
        let (runtime, service) = self.handles();
        runtime
            .block_on(service.get_all())
            .expect("listing should succeed")
    }

    fn last_error(&self) -> Error {
        self.last_result
            .get()
            .expect("result should be set")
            .expect_err("import should fail")
    }

    fn last_pos(&self) -> Pos {
        self.last_result
            .get()
            .expect("result should be set")
            .expect("import should succeed")
    }
}

#[fixture]
fn world() -> ImportWorld {
    ImportWorld::default()
}

#[given("an import service backed by fixture OSM nodes and in-memory storage")]
fn an_import_service_backed_by_fixture_osm_nodes_and_in_memory_storage(world: &ImportWorld) {
    world.setup_service();
}

#[when("node 5589879349 is imported")]
fn node_5589879349_is_imported(world: &ImportWorld) {
    world.import(RADA_NODE);
}

#[when("the same node is imported again")]
fn the_same_node_is_imported_again(world: &ImportWorld) {
    world.import(RADA_NODE);
}

#[when("the Bergheim bakery node is imported")]
fn the_bergheim_bakery_node_is_imported(world: &ImportWorld) {
    world.import(BAKERY_NODE);
}

#[when("the node without a city is imported")]
fn the_node_without_a_city_is_imported(world: &ImportWorld) {
    world.import(NO_CITY_NODE);
}

#[when("an unknown node is imported")]
fn an_unknown_node_is_imported(world: &ImportWorld) {
    world.import(UNKNOWN_NODE);
}

#[then("the import stores the Rada café on the Altstadt campus")]
fn the_import_stores_the_rada_cafe_on_the_altstadt_campus(world: &ImportWorld) {
    let pos = world.last_pos();
    assert!(pos.id.is_some());
    assert_eq!(pos.name, "Rada Coffee & Rösterei");
    assert_eq!(pos.description, "");
    assert_eq!(pos.pos_type, PosType::Cafe);
    assert_eq!(pos.campus, CampusType::Altstadt);
    assert_eq!(pos.street, "Untere Straße");
    assert_eq!(pos.house_number, "21");
    assert_eq!(pos.postal_code, 69117);
    assert_eq!(pos.city, "Heidelberg");
    assert!(pos.created_at.is_some());
}

#[then("the import stores a bakery on the Bergheim campus")]
fn the_import_stores_a_bakery_on_the_bergheim_campus(world: &ImportWorld) {
    let pos = world.last_pos();
    assert_eq!(pos.name, "Bäckerei am Bismarckplatz");
    assert_eq!(pos.description, "Brezeln & Kaffee");
    assert_eq!(pos.pos_type, PosType::Bakery);
    assert_eq!(pos.campus, CampusType::Bergheim);
    assert_eq!(pos.house_number, "1a");
}

#[then("exactly one POS is stored")]
fn exactly_one_pos_is_stored(world: &ImportWorld) {
    assert_eq!(world.stored().len(), 1);
}

#[then("no POS is stored")]
fn no_pos_is_stored(world: &ImportWorld) {
    assert!(world.stored().is_empty());
}

#[then("the import fails because addr:city is missing")]
fn the_import_fails_because_addr_city_is_missing(world: &ImportWorld) {
    let error = world.last_error();
    assert_eq!(
        error,
        Error::missing_required_field(NO_CITY_NODE, RequiredField::City)
    );
    assert!(error.to_string().contains("addr:city"));
}

#[then("the import fails with a duplicate name")]
fn the_import_fails_with_a_duplicate_name(world: &ImportWorld) {
    let error = world.last_error();
    assert_eq!(error.code(), ErrorCode::DuplicateName);
    assert_eq!(error, Error::duplicate_name("Rada Coffee & Rösterei"));
}

#[then("the import fails because the OSM node was not found")]
fn the_import_fails_because_the_osm_node_was_not_found(world: &ImportWorld) {
    assert_eq!(world.last_error(), Error::source_not_found(UNKNOWN_NODE));
}

#[scenario(
    path = "tests/features/osm_import.feature",
    name = "A complete café node becomes a stored POS"
)]
fn a_complete_cafe_node_becomes_a_stored_pos(world: ImportWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/osm_import.feature",
    name = "A bakery node in Bergheim is classified from its tags"
)]
fn a_bakery_node_in_bergheim_is_classified_from_its_tags(world: ImportWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/osm_import.feature",
    name = "A node without a city is rejected before storage"
)]
fn a_node_without_a_city_is_rejected_before_storage(world: ImportWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/osm_import.feature",
    name = "Importing the same node twice collides on the name"
)]
fn importing_the_same_node_twice_collides_on_the_name(world: ImportWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/osm_import.feature",
    name = "An unknown node is reported as not found"
)]
fn an_unknown_node_is_reported_as_not_found(world: ImportWorld) {
    drop(world);
}
