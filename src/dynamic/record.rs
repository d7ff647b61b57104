use std::fmt;
use std::sync::Arc;

use crate::types::{DataType, Record, Value};

type BuildFn = Arc<dyn Fn(&[Value]) -> Vec<Value> + Send + Sync>;

/// One constructor of a [`RecordType`]: a parameter list and the function building the record's
/// fields from matching arguments.
#[derive(Clone)]
pub struct Constructor {
    params: Vec<DataType>,
    build: BuildFn,
}

impl Constructor {
    /// Parameter types, in order.
    pub fn params(&self) -> &[DataType] {
        &self.params
    }

    /// `true` if `args` can be passed to this constructor. `None` stands for a null argument,
    /// which fits any parameter.
    pub fn accepts(&self, args: &[Option<DataType>]) -> bool {
        self.params.len() == args.len()
            && self
                .params
                .iter()
                .zip(args)
                .all(|(param, arg)| arg.as_ref().is_none_or(|t| t == param))
    }

    /// Build the record fields. Callers pass arguments already checked with [`Self::accepts`].
    pub(crate) fn build(&self, args: &[Value]) -> Vec<Value> {
        (self.build)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor").field("params", &self.params).finish()
    }
}

/// Output type of a dynamic `selecting` stage.
///
/// ```rust
/// use seq_view::dynamic::RecordType;
/// use seq_view::types::{DataType, Value};
///
/// let point = RecordType::new("point")
///     .constructor(vec![], |_| vec![Value::Int64(640), Value::Int64(480), Value::Int64(32)])
///     .constructor(vec![DataType::Int64, DataType::Int64], |a| {
///         vec![a[0].clone(), a[1].clone(), Value::Int64(32)]
///     })
///     .fieldwise(vec![DataType::Int64, DataType::Int64, DataType::Int64]);
///
/// let p = point.construct(&[Value::Int64(1), Value::Int64(2)]).unwrap();
/// assert_eq!(p.fields, vec![Value::Int64(1), Value::Int64(2), Value::Int64(32)]);
/// assert!(point.construct(&[Value::from("x")]).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RecordType {
    name: String,
    constructors: Vec<Constructor>,
}

impl RecordType {
    /// Create a record type with no constructors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructors: Vec::new(),
        }
    }

    /// Add a constructor taking `params` and building the fields with `build`.
    ///
    /// `build` is only called with arguments matching `params`.
    pub fn constructor<F>(mut self, params: Vec<DataType>, build: F) -> Self
    where
        F: Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static,
    {
        self.constructors.push(Constructor {
            params,
            build: Arc::new(build),
        });
        self
    }

    /// Add a constructor whose arguments become the fields unchanged.
    pub fn fieldwise(self, params: Vec<DataType>) -> Self {
        self.constructor(params, |args| args.to_vec())
    }

    /// Name of the record type, also the name of every record it builds.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The [`DataType::Record`] of records built by this type.
    pub fn data_type(&self) -> DataType {
        DataType::Record(self.name.clone())
    }

    /// Constructors in declaration order.
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    /// Index of the first constructor (in declaration order) accepting `args`.
    pub fn find_constructor(&self, args: &[Option<DataType>]) -> Option<usize> {
        self.constructors.iter().position(|c| c.accepts(args))
    }

    /// Build a record from `args`, choosing the constructor by argument types.
    pub fn construct(&self, args: &[Value]) -> Option<Record> {
        let types: Vec<Option<DataType>> = args.iter().map(Value::data_type).collect();
        let index = self.find_constructor(&types)?;
        let fields = self.constructors[index].build(args);
        Some(Record::new(self.name.clone(), fields))
    }
}
