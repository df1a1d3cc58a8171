//! Owned, opaque XML element tree used for tokens, token references, and extension content.
//!
//! The engine never interprets token content. It only needs to address elements by
//! (namespace, local name), read the `ID` attribute used as a signature reference, clone a
//! token into a standalone document, and put namespace declarations into a canonical form.

// self
use crate::_prelude::*;

/// Qualified name of a token element, used as a provider binding criterion.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenElementName {
	/// Namespace URI; empty when the element is unqualified.
	pub namespace: String,
	/// Local element name.
	pub local_name: String,
}
impl TokenElementName {
	/// Creates a qualified name from its parts.
	pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
		Self { namespace: namespace.into(), local_name: local_name.into() }
	}
}
impl Display for TokenElementName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}:{}", self.namespace, self.local_name)
	}
}

/// Child node of an [`Element`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
	/// Nested element.
	Element(Element),
	/// Character data.
	Text(String),
}

/// XML element with its namespace declarations, attributes, and children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Element {
	/// Prefix used when the element was serialized, if any.
	pub prefix: Option<String>,
	/// Namespace URI the element belongs to.
	pub namespace: Option<String>,
	/// Local element name.
	pub local_name: String,
	/// Namespace declarations made on this element (`""` is the default namespace).
	pub namespaces: BTreeMap<String, String>,
	/// Attributes keyed by their (possibly prefixed) name.
	pub attributes: BTreeMap<String, String>,
	/// Child nodes in document order.
	pub children: Vec<Node>,
}
impl Element {
	/// Attribute holding the identifier referenced by enveloped signatures.
	pub const ID_ATTRIBUTE: &'static str = "ID";

	/// Creates an element in the provided namespace.
	pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
		let namespace = namespace.into();

		Self {
			namespace: (!namespace.is_empty()).then_some(namespace),
			local_name: local_name.into(),
			..Default::default()
		}
	}

	/// Creates an element without a namespace.
	pub fn unqualified(local_name: impl Into<String>) -> Self {
		Self { local_name: local_name.into(), ..Default::default() }
	}

	/// Sets the serialization prefix.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());

		self
	}

	/// Declares a namespace binding on this element.
	pub fn with_namespace_declaration(
		mut self,
		prefix: impl Into<String>,
		uri: impl Into<String>,
	) -> Self {
		self.namespaces.insert(prefix.into(), uri.into());

		self
	}

	/// Sets an attribute value.
	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), value.into());

		self
	}

	/// Appends a child element.
	pub fn with_child(mut self, child: Element) -> Self {
		self.children.push(Node::Element(child));

		self
	}

	/// Appends character data.
	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.children.push(Node::Text(text.into()));

		self
	}

	/// Returns the attribute value, if set.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.get(name).map(String::as_str)
	}

	/// Returns the `ID` attribute used as a same-document signature reference.
	pub fn id(&self) -> Option<&str> {
		self.attribute(Self::ID_ATTRIBUTE)
	}

	/// Qualified name used to resolve providers for this element.
	pub fn name(&self) -> TokenElementName {
		TokenElementName::new(self.namespace.clone().unwrap_or_default(), self.local_name.clone())
	}

	/// Returns `true` when the element has the provided namespace and local name.
	pub fn is(&self, namespace: &str, local_name: &str) -> bool {
		self.local_name == local_name && self.namespace.as_deref().unwrap_or_default() == namespace
	}

	/// Iterates over child elements, skipping character data.
	pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
		self.children.iter().filter_map(|node| match node {
			Node::Element(element) => Some(element),
			Node::Text(_) => None,
		})
	}

	/// Returns the first child element, if any.
	pub fn first_child_element(&self) -> Option<&Element> {
		self.child_elements().next()
	}

	/// Concatenated character data of the direct children.
	pub fn text(&self) -> String {
		self.children
			.iter()
			.filter_map(|node| match node {
				Node::Text(text) => Some(text.as_str()),
				Node::Element(_) => None,
			})
			.collect()
	}

	/// Depth-first search (self included) for the first element with the provided name.
	pub fn find(&self, namespace: &str, local_name: &str) -> Option<&Element> {
		if self.is(namespace, local_name) {
			return Some(self);
		}

		self.child_elements().find_map(|child| child.find(namespace, local_name))
	}

	/// Puts namespace declarations into canonical form.
	///
	/// Declarations that repeat a binding already in scope are dropped and every element gets
	/// a binding for its own prefix. Applying the normalization twice is a no-op.
	pub fn normalize_namespaces(&mut self) {
		normalize(self, &BTreeMap::new());
	}
}

fn normalize(element: &mut Element, in_scope: &BTreeMap<String, String>) {
	element.namespaces.retain(|prefix, uri| in_scope.get(prefix) != Some(uri));

	let mut scope = in_scope.clone();

	scope.extend(element.namespaces.iter().map(|(p, u)| (p.clone(), u.clone())));

	let prefix = element.prefix.clone().unwrap_or_default();
	let own = element.namespace.clone().unwrap_or_default();
	let bound = scope.get(&prefix).map(String::as_str).unwrap_or_default();

	// An unqualified element under a default namespace must undeclare it.
	if bound != own {
		element.namespaces.insert(prefix.clone(), own.clone());
		scope.insert(prefix, own);
	}

	for child in element.children.iter_mut() {
		if let Node::Element(child) = child {
			normalize(child, &scope);
		}
	}
}
