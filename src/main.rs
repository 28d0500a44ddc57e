//! Demonstrates the three conversion patterns over a throwaway local store
//! file: an immutable reference-like wrapper, an immutable `Copy` wrapper,
//! and a `Vec<i64>` persisted as JSON text with a sequence comparer for
//! change detection.

use anyhow::{Result, ensure};
use convtrack::{
    Context, Conversion, DataType, Mapped, Model, ModelBuilder, PropertyMapping, TableSchema,
    ValueComparer,
};
use log::info;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = Path::new("test.db");
    immutable_wrapper_property(path)?;
    copy_wrapper_property(path)?;
    list_property(path)?;
    Ok(())
}

fn immutable_wrapper_property(path: &Path) -> Result<()> {
    info!("Sample showing value conversions for a simple immutable wrapper...");

    clean_database(path)?;

    {
        let mut ctx = Context::open(path, model()?)?;

        info!("Save a new entity...");
        ctx.add(Account {
            id: 0,
            code: AccountCode::new(7),
        });
        ctx.save_changes()?;

        info!("Change the property value and save again...");
        // Replacing the whole value is the only way to change it; the
        // structural comparer picks this up on save.
        let account = ctx.tracked_single_mut::<Account>()?;
        account.code = AccountCode::new(77);
        ctx.save_changes()?;
    }

    {
        let mut ctx = Context::open(path, model()?)?;

        info!("Read the entity back...");
        let account = ctx.single::<Account>()?;
        ensure!(account.code.value() == 77);
    }

    info!("Sample finished.");
    Ok(())
}

fn copy_wrapper_property(path: &Path) -> Result<()> {
    info!("Sample showing value conversions for a simple Copy wrapper...");

    clean_database(path)?;

    {
        let mut ctx = Context::open(path, model()?)?;

        info!("Save a new entity...");
        ctx.add(Ticket {
            id: 0,
            priority: Priority::new(6),
        });
        ctx.save_changes()?;

        info!("Change the property value and save again...");
        let ticket = ctx.tracked_single_mut::<Ticket>()?;
        ticket.priority = Priority::new(66);
        ctx.save_changes()?;
    }

    {
        let mut ctx = Context::open(path, model()?)?;

        info!("Read the entity back...");
        let ticket = ctx.single::<Ticket>()?;
        ensure!(ticket.priority.value() == 66);
    }

    info!("Sample finished.");
    Ok(())
}

fn list_property(path: &Path) -> Result<()> {
    info!("Sample showing value conversions for a Vec<i64>...");

    clean_database(path)?;

    {
        let mut ctx = Context::open(path, model()?)?;

        info!("Save a new entity...");
        ctx.add(Route {
            id: 0,
            stops: vec![1, 2, 3],
        });
        ctx.save_changes()?;

        info!("Mutate the property value and save again...");
        // Mutated in place, not replaced; only the sequence comparer's
        // snapshot makes this change visible to save_changes.
        let route = ctx.tracked_single_mut::<Route>()?;
        route.stops.push(4);
        ctx.save_changes()?;
    }

    {
        let mut ctx = Context::open(path, model()?)?;

        info!("Read the entity back...");
        let route = ctx.single::<Route>()?;
        ensure!(route.stops == vec![1, 2, 3, 4]);
    }

    info!("Sample finished.");
    Ok(())
}

fn clean_database(path: &Path) -> Result<()> {
    info!("Deleting and re-creating database...");
    let mut ctx = Context::open(path, model()?)?;
    ctx.ensure_deleted()?;
    ctx.ensure_created()?;
    info!("Done. Database is clean and fresh.");
    Ok(())
}

fn model() -> convtrack::Result<Model> {
    ModelBuilder::new()
        .entity::<Account>()
        .entity::<Ticket>()
        .entity::<Route>()
        .build()
}

/// Immutable wrapper with value-based equality. Any change produces a new
/// instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AccountCode {
    value: i64,
}

impl AccountCode {
    fn new(value: i64) -> Self {
        Self { value }
    }

    fn value(&self) -> i64 {
        self.value
    }
}

/// Immutable wrapper with copy semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Priority {
    value: i64,
}

impl Priority {
    fn new(value: i64) -> Self {
        Self { value }
    }

    fn value(&self) -> i64 {
        self.value
    }
}

struct Account {
    id: i64,
    code: AccountCode,
}

impl Mapped for Account {
    type Property = AccountCode;

    const TABLE: &'static str = "accounts";

    fn table_schema() -> TableSchema {
        TableSchema::for_entity(Self::TABLE, "code", DataType::Integer)
    }

    fn property_mapping() -> PropertyMapping<AccountCode> {
        PropertyMapping::new(Conversion::integer(AccountCode::value, AccountCode::new))
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn property(&self) -> &AccountCode {
        &self.code
    }

    fn property_mut(&mut self) -> &mut AccountCode {
        &mut self.code
    }

    fn from_parts(id: i64, code: AccountCode) -> Self {
        Self { id, code }
    }
}

struct Ticket {
    id: i64,
    priority: Priority,
}

impl Mapped for Ticket {
    type Property = Priority;

    const TABLE: &'static str = "tickets";

    fn table_schema() -> TableSchema {
        TableSchema::for_entity(Self::TABLE, "priority", DataType::Integer)
    }

    fn property_mapping() -> PropertyMapping<Priority> {
        PropertyMapping::new(Conversion::integer(Priority::value, Priority::new))
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn property(&self) -> &Priority {
        &self.priority
    }

    fn property_mut(&mut self) -> &mut Priority {
        &mut self.priority
    }

    fn from_parts(id: i64, priority: Priority) -> Self {
        Self { id, priority }
    }
}

struct Route {
    id: i64,
    stops: Vec<i64>,
}

impl Mapped for Route {
    type Property = Vec<i64>;

    const TABLE: &'static str = "routes";

    fn table_schema() -> TableSchema {
        TableSchema::for_entity(Self::TABLE, "stops", DataType::Text)
    }

    fn property_mapping() -> PropertyMapping<Vec<i64>> {
        PropertyMapping::new(Conversion::json_text()).with_comparer(ValueComparer::sequence())
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn property(&self) -> &Vec<i64> {
        &self.stops
    }

    fn property_mut(&mut self) -> &mut Vec<i64> {
        &mut self.stops
    }

    fn from_parts(id: i64, stops: Vec<i64>) -> Self {
        Self { id, stops }
    }
}
