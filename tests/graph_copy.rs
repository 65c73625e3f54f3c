//! End-to-end copies of a small social graph: nested objects, containers,
//! shared handles, a self-referential partner and a few failure shapes.

use std::fmt;
use std::hash::{Hash, Hasher};

use deepcopy::error::{ConstructionFailure, FieldWriteError};
use deepcopy::hash::{HashMap, value_hasher};
use deepcopy::info::{
    Constructor, DescriptorCell, FieldDescriptor, FieldFlags, ObjectDescriptor, ParamKind,
    ScalarKind, Seed, TypeDescriptor, Typed,
};
use deepcopy::ops::{DynArray, Object, Shared, ValueMut, ValueRef, take_field};
use deepcopy::{CopyError, Inspect, deep_copy, deep_copy_opt};

// -----------------------------------------------------------------------------
// Person

struct Person {
    title: String,
    name: Option<String>,
    age: i32,
    books: HashMap<String, i32>,
    partner: Option<Shared<Person>>,
    numbers: Option<DynArray>,
    flagged: bool,
    tags: Vec<String>,
    service: Option<Box<dyn Inspect>>,
}

fn build_person(seeds: &[Seed]) -> Result<Box<dyn Inspect>, ConstructionFailure> {
    let title = seeds
        .first()
        .and_then(Seed::text)
        .ok_or_else(|| ConstructionFailure::new("expected a text seed"))?;
    let age = seeds
        .get(1)
        .and_then(Seed::scalar)
        .and_then(|scalar| scalar.as_int())
        .ok_or_else(|| ConstructionFailure::new("expected an int seed"))?;
    Ok(Box::new(Person {
        title: title.to_string(),
        name: None,
        age,
        books: HashMap::default(),
        partner: None,
        numbers: None,
        flagged: false,
        tags: Vec::new(),
        service: None,
    }))
}

impl Typed for Person {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::Object(ObjectDescriptor::new::<Person>(
                [
                    FieldDescriptor::new("title"),
                    FieldDescriptor::new("name"),
                    FieldDescriptor::new("age"),
                    FieldDescriptor::new("books"),
                    FieldDescriptor::new("partner"),
                    FieldDescriptor::new("numbers"),
                    FieldDescriptor::new("flagged"),
                    FieldDescriptor::new("tags"),
                    FieldDescriptor::new("service"),
                ],
                [Constructor::new(
                    &[
                        ParamKind::Text,
                        ParamKind::Scalar(ScalarKind::Int),
                        ParamKind::Reference,
                    ],
                    build_person,
                )],
            ))
        })
    }
}

impl Inspect for Person {
    fn descriptor(&self) -> &'static TypeDescriptor {
        Self::type_descriptor()
    }

    fn shape(&self) -> ValueRef<'_> {
        ValueRef::Object(self)
    }

    fn shape_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Object(self)
    }

    fn value_eq(&self, other: &dyn Inspect) -> Option<bool> {
        other.downcast_ref::<Self>().map(|other| self == other)
    }

    // The service box is identity-free and stays out of the hash, like it
    // stays out of equality.
    fn value_hash(&self) -> Option<u64> {
        let mut hasher = value_hasher();
        self.title.value_hash()?.hash(&mut hasher);
        match &self.name {
            Some(name) => name.value_hash()?.hash(&mut hasher),
            None => 0u64.hash(&mut hasher),
        }
        self.age.value_hash()?.hash(&mut hasher);
        self.books.value_hash()?.hash(&mut hasher);
        match &self.partner {
            Some(partner) => partner.value_hash()?.hash(&mut hasher),
            None => 0u64.hash(&mut hasher),
        }
        match &self.numbers {
            Some(numbers) => numbers.value_hash()?.hash(&mut hasher),
            None => 0u64.hash(&mut hasher),
        }
        self.flagged.value_hash()?.hash(&mut hasher);
        self.tags.value_hash()?.hash(&mut hasher);
        Some(hasher.finish())
    }
}

impl Object for Person {
    fn field_at(&self, index: usize) -> Option<&dyn Inspect> {
        match index {
            0 => Some(&self.title),
            1 => self.name.as_ref().map(|name| name as &dyn Inspect),
            2 => Some(&self.age),
            3 => Some(&self.books),
            4 => self.partner.as_ref().map(|partner| partner as &dyn Inspect),
            5 => self.numbers.as_ref().map(|numbers| numbers as &dyn Inspect),
            6 => Some(&self.flagged),
            7 => Some(&self.tags),
            8 => self.service.as_deref(),
            _ => None,
        }
    }

    fn set_field(
        &mut self,
        index: usize,
        value: Box<dyn Inspect>,
    ) -> Result<(), FieldWriteError> {
        match index {
            0 => self.title = take_field(value)?,
            1 => self.name = Some(take_field(value)?),
            2 => self.age = take_field(value)?,
            3 => self.books = take_field(value)?,
            4 => self.partner = Some(take_field(value)?),
            5 => self.numbers = Some(take_field(value)?),
            6 => self.flagged = take_field(value)?,
            7 => self.tags = take_field(value)?,
            8 => self.service = Some(value),
            _ => panic!("field index {index} out of range"),
        }
        Ok(())
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.name == other.name
            && self.age == other.age
            && self.books == other.books
            && self.partner == other.partner
            && self.numbers == other.numbers
            && self.flagged == other.flagged
            && self.tags == other.tags
    }
}

impl fmt::Debug for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug_fmt(f)
    }
}

// -----------------------------------------------------------------------------
// Stamper — a typeless payload carried behind `Box<dyn Inspect>`

struct Stamper {
    label: String,
}

impl Typed for Stamper {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::Object(ObjectDescriptor::new::<Stamper>(
                [FieldDescriptor::new("label")],
                [Constructor::new(&[], |_seeds| {
                    Ok(Box::new(Stamper {
                        label: String::from("ready"),
                    }))
                })],
            ))
        })
    }
}

impl Inspect for Stamper {
    fn descriptor(&self) -> &'static TypeDescriptor {
        Self::type_descriptor()
    }

    fn shape(&self) -> ValueRef<'_> {
        ValueRef::Object(self)
    }

    fn shape_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Object(self)
    }
}

impl Object for Stamper {
    fn field_at(&self, index: usize) -> Option<&dyn Inspect> {
        match index {
            0 => Some(&self.label),
            _ => None,
        }
    }

    fn set_field(
        &mut self,
        index: usize,
        value: Box<dyn Inspect>,
    ) -> Result<(), FieldWriteError> {
        match index {
            0 => self.label = take_field(value)?,
            _ => panic!("field index {index} out of range"),
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Guarded — a validating constructor that refuses placeholder zeros

struct Guarded {
    level: i32,
}

impl Typed for Guarded {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::Object(ObjectDescriptor::new::<Guarded>(
                [FieldDescriptor::new("level")],
                [Constructor::new(&[ParamKind::Scalar(ScalarKind::Int)], |seeds| {
                    let level = seeds
                        .first()
                        .and_then(Seed::scalar)
                        .and_then(|scalar| scalar.as_int())
                        .ok_or_else(|| ConstructionFailure::new("expected an int seed"))?;
                    if level < 1 {
                        return Err(ConstructionFailure::new("level must be at least 1"));
                    }
                    Ok(Box::new(Guarded { level }))
                })],
            ))
        })
    }
}

impl Inspect for Guarded {
    fn descriptor(&self) -> &'static TypeDescriptor {
        Self::type_descriptor()
    }

    fn shape(&self) -> ValueRef<'_> {
        ValueRef::Object(self)
    }

    fn shape_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Object(self)
    }
}

impl Object for Guarded {
    fn field_at(&self, index: usize) -> Option<&dyn Inspect> {
        match index {
            0 => Some(&self.level),
            _ => None,
        }
    }

    fn set_field(
        &mut self,
        index: usize,
        value: Box<dyn Inspect>,
    ) -> Result<(), FieldWriteError> {
        match index {
            0 => self.level = take_field(value)?,
            _ => panic!("field index {index} out of range"),
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Holder — propagates a nested construction failure

struct Holder {
    inner: Guarded,
}

impl Typed for Holder {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::Object(ObjectDescriptor::new::<Holder>(
                [FieldDescriptor::new("inner")],
                [Constructor::new(&[], |_seeds| {
                    Ok(Box::new(Holder {
                        inner: Guarded { level: 1 },
                    }))
                })],
            ))
        })
    }
}

impl Inspect for Holder {
    fn descriptor(&self) -> &'static TypeDescriptor {
        Self::type_descriptor()
    }

    fn shape(&self) -> ValueRef<'_> {
        ValueRef::Object(self)
    }

    fn shape_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Object(self)
    }
}

impl Object for Holder {
    fn field_at(&self, index: usize) -> Option<&dyn Inspect> {
        match index {
            0 => Some(&self.inner),
            _ => None,
        }
    }

    fn set_field(
        &mut self,
        index: usize,
        value: Box<dyn Inspect>,
    ) -> Result<(), FieldWriteError> {
        match index {
            0 => self.inner = take_field(value)?,
            _ => panic!("field index {index} out of range"),
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Sealed — restricted and transient fields

struct Sealed {
    id: i32,
    cache: i32,
    label: String,
}

impl Typed for Sealed {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::Object(ObjectDescriptor::new::<Sealed>(
                [
                    FieldDescriptor::new("id").with_flags(FieldFlags::RESTRICTED),
                    FieldDescriptor::new("cache").with_flags(FieldFlags::TRANSIENT),
                    FieldDescriptor::new("label"),
                ],
                [Constructor::new(&[], |_seeds| {
                    Ok(Box::new(Sealed {
                        id: 42,
                        cache: 7,
                        label: String::from("0"),
                    }))
                })],
            ))
        })
    }
}

impl Inspect for Sealed {
    fn descriptor(&self) -> &'static TypeDescriptor {
        Self::type_descriptor()
    }

    fn shape(&self) -> ValueRef<'_> {
        ValueRef::Object(self)
    }

    fn shape_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Object(self)
    }
}

impl Object for Sealed {
    fn field_at(&self, index: usize) -> Option<&dyn Inspect> {
        match index {
            0 => Some(&self.id),
            1 => Some(&self.cache),
            2 => Some(&self.label),
            _ => None,
        }
    }

    fn set_field(
        &mut self,
        index: usize,
        value: Box<dyn Inspect>,
    ) -> Result<(), FieldWriteError> {
        match index {
            // The copier must never write these.
            0 => panic!("id refuses external writes"),
            1 => panic!("cache refuses external writes"),
            2 => self.label = take_field(value)?,
            _ => panic!("field index {index} out of range"),
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Bare — registers no constructor at all

struct Bare;

impl Typed for Bare {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| TypeDescriptor::Object(ObjectDescriptor::new::<Bare>([], [])))
    }
}

impl Inspect for Bare {
    fn descriptor(&self) -> &'static TypeDescriptor {
        Self::type_descriptor()
    }

    fn shape(&self) -> ValueRef<'_> {
        ValueRef::Object(self)
    }

    fn shape_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Object(self)
    }
}

impl Object for Bare {
    fn field_at(&self, _index: usize) -> Option<&dyn Inspect> {
        None
    }

    fn set_field(
        &mut self,
        _index: usize,
        _value: Box<dyn Inspect>,
    ) -> Result<(), FieldWriteError> {
        panic!("no fields declared")
    }
}

// -----------------------------------------------------------------------------
// Fixtures

fn pavel() -> Person {
    let mut books = HashMap::default();
    books.insert(String::from("travel"), 4);
    books.insert(String::from("chess"), 5);

    let mut numbers = DynArray::new();
    numbers.push(1i32);
    numbers.push(String::from("two"));
    numbers.push(3i64);

    Person {
        title: String::from("Mr"),
        name: Some(String::from("Pavel")),
        age: 34,
        books,
        partner: None,
        numbers: Some(numbers),
        flagged: true,
        tags: vec![String::from("reader"), String::from("walker")],
        service: Some(Box::new(Stamper {
            label: String::from("alpha"),
        })),
    }
}

fn olga(partner: Shared<Person>) -> Person {
    let mut books = HashMap::default();
    books.insert(String::from("poetry"), 3);

    Person {
        title: String::from("Ms"),
        name: Some(String::from("Olga")),
        age: 30,
        books,
        partner: Some(partner),
        numbers: None,
        flagged: false,
        tags: Vec::new(),
        service: None,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[test]
fn copies_a_nested_graph_by_value() {
    let pavel_handle = Shared::new(pavel());
    let source = olga(pavel_handle.clone());

    let copied = deep_copy(&source).unwrap();
    let copied = copied.take::<Person>().ok().unwrap();

    assert_eq!(copied, source);
    assert_eq!(copied.value_hash(), source.value_hash());

    // The partner is a fresh allocation holding an equal value.
    let copied_partner = copied.partner.as_ref().unwrap();
    assert!(!copied_partner.ptr_eq(&pavel_handle));
    assert_eq!(*copied_partner.borrow(), *pavel_handle.borrow());
}

#[test]
fn containers_are_rebuilt_not_shared() {
    let source = pavel();

    let copied = deep_copy(&source).unwrap();
    let mut copied = copied.take::<Person>().ok().unwrap();

    copied.books.insert(String::from("cooking"), 1);
    copied.tags.push(String::from("extra"));
    assert_eq!(source.books.len(), 2);
    assert_eq!(source.tags.len(), 2);
}

#[test]
fn typeless_payloads_copy_through_their_descriptor() {
    let source = pavel();

    let copied = deep_copy(&source).unwrap();
    let copied = copied.take::<Person>().ok().unwrap();

    let service = copied.service.as_deref().unwrap();
    let stamper = service.downcast_ref::<Stamper>().unwrap();
    assert_eq!(stamper.label, "alpha");
}

#[test]
fn arrays_copy_positionally_inside_objects() {
    let source = pavel();

    let copied = deep_copy(&source).unwrap();
    let copied = copied.take::<Person>().ok().unwrap();

    let numbers = copied.numbers.as_ref().unwrap();
    assert_eq!(
        numbers.value_eq(source.numbers.as_ref().unwrap()),
        Some(true)
    );
}

#[test]
fn degenerate_arrays_collapse_to_empty() {
    let mut source = pavel();
    let mut numbers = DynArray::new();
    numbers.push_boxed(None);
    numbers.push(9i32);
    source.numbers = Some(numbers);

    let copied = deep_copy(&source).unwrap();
    let copied = copied.take::<Person>().ok().unwrap();
    assert!(copied.numbers.as_ref().unwrap().is_empty());
}

#[test]
fn self_referential_partner_points_at_the_copy() {
    let person = Shared::new(pavel());
    person.borrow_mut().partner = Some(person.clone());

    let copied = deep_copy(&person).unwrap();
    let copied = copied.take::<Shared<Person>>().ok().unwrap();

    assert_ne!(copied.address(), person.address());
    let inner = copied.borrow();
    let partner = inner.partner.as_ref().unwrap();
    assert_eq!(partner.address(), copied.address());

    // Break the cycles so the fixtures can drop.
    drop(inner);
    copied.borrow_mut().partner = None;
    person.borrow_mut().partner = None;
}

#[test]
fn absent_fields_stay_absent() {
    let mut source = pavel();
    source.name = None;
    source.service = None;

    let copied = deep_copy(&source).unwrap();
    let copied = copied.take::<Person>().ok().unwrap();
    assert!(copied.name.is_none());
    assert!(copied.service.is_none());

    assert!(deep_copy_opt(None).unwrap().is_none());
}

#[test]
fn restricted_and_transient_fields_keep_constructor_values() {
    let source = Sealed {
        id: 100,
        cache: 50,
        label: String::from("real"),
    };

    let copied = deep_copy(&source).unwrap();
    let copied = copied.take::<Sealed>().ok().unwrap();
    assert_eq!(copied.id, 42);
    assert_eq!(copied.cache, 7);
    assert_eq!(copied.label, "real");
}

#[test]
fn validating_constructors_abort_the_copy() {
    let err = deep_copy(&Guarded { level: 5 }).unwrap_err();
    assert!(matches!(err, CopyError::Construction { .. }));
}

#[test]
fn nested_construction_failures_surface() {
    let err = deep_copy(&Holder {
        inner: Guarded { level: 3 },
    })
    .unwrap_err();
    match err {
        CopyError::Construction { type_name, .. } => {
            assert!(type_name.contains("Guarded"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn types_without_constructors_are_uncopyable() {
    let err = deep_copy(&Bare).unwrap_err();
    assert!(matches!(err, CopyError::NoViableConstructor { .. }));
}
