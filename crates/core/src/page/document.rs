//! Document seam: the handful of element operations the binder needs.

use std::collections::BTreeMap;

use pricewise_shared::PageSelectors;

/// Opaque handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(usize);

impl ElementRef {
    /// Creates a handle from an implementation-defined index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Implementation-defined index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Element lookups and mutations.
///
/// Mutations on a stale handle are ignored.
pub trait Document {
    /// Element with the given id, if present.
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    /// Every element carrying `class`, in document order.
    fn elements_by_class(&self, class: &str) -> Vec<ElementRef>;

    /// Replaces the element's text content.
    fn set_text(&mut self, element: ElementRef, text: &str);

    /// Current value of a form control.
    fn value(&self, element: ElementRef) -> Option<String>;

    /// Sets the value of a form control.
    fn set_value(&mut self, element: ElementRef, value: &str);

    /// Number of options in a select control.
    fn option_count(&self, element: ElementRef) -> usize;

    /// Appends an option to a select control.
    fn append_option(&mut self, element: ElementRef, value: &str, label: &str);

    /// Sets an attribute.
    fn set_attribute(&mut self, element: ElementRef, name: &str, value: &str);
}

/// Option of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Visible label.
    pub label: String,
}

/// An element held by [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Element id.
    pub id: Option<String>,
    /// Class list.
    pub classes: Vec<String>,
    /// Text content.
    pub text: String,
    /// Form control value.
    pub value: Option<String>,
    /// Select options.
    pub options: Vec<SelectOption>,
    /// Attributes.
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the form value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns true if the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// In-process document used by tests and the preview binary.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<Element>,
}

impl MemoryDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a product page: currency select, quantity input, projected
    /// total, `price_displays` price elements, one currency label and one
    /// add-to-cart button.
    #[must_use]
    pub fn storefront(selectors: &PageSelectors, price_displays: usize, quantity: &str) -> Self {
        let mut doc = Self::new();
        doc.push(Element::new().with_id(&selectors.currency_select));
        doc.push(
            Element::new()
                .with_id(&selectors.quantity_input)
                .with_value(quantity),
        );
        doc.push(Element::new().with_id(&selectors.projected_total));
        for _ in 0..price_displays {
            doc.push(Element::new().with_class(&selectors.price_display));
        }
        doc.push(Element::new().with_class(&selectors.currency_label));
        doc.push(
            Element::new()
                .with_class(&selectors.add_to_cart)
                .with_attribute(&selectors.price_attribute, ""),
        );
        doc
    }

    /// Appends an element and returns its handle.
    pub fn push(&mut self, element: Element) -> ElementRef {
        self.elements.push(element);
        ElementRef::new(self.elements.len() - 1)
    }

    /// Element behind `handle`.
    #[must_use]
    pub fn get(&self, handle: ElementRef) -> Option<&Element> {
        self.elements.get(handle.index())
    }

    /// Text of the element behind `handle`.
    #[must_use]
    pub fn text(&self, handle: ElementRef) -> Option<&str> {
        self.get(handle).map(|e| e.text.as_str())
    }

    /// Attribute of the element behind `handle`.
    #[must_use]
    pub fn attribute(&self, handle: ElementRef, name: &str) -> Option<&str> {
        self.get(handle)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    /// Every element in document order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementRef, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementRef::new(i), e))
    }

    fn get_mut(&mut self, handle: ElementRef) -> Option<&mut Element> {
        self.elements.get_mut(handle.index())
    }
}

impl Document for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(ElementRef::new)
    }

    fn elements_by_class(&self, class: &str) -> Vec<ElementRef> {
        self.elements()
            .filter(|(_, e)| e.has_class(class))
            .map(|(handle, _)| handle)
            .collect()
    }

    fn set_text(&mut self, element: ElementRef, text: &str) {
        if let Some(e) = self.get_mut(element) {
            e.text = text.to_string();
        }
    }

    fn value(&self, element: ElementRef) -> Option<String> {
        self.get(element).and_then(|e| e.value.clone())
    }

    fn set_value(&mut self, element: ElementRef, value: &str) {
        if let Some(e) = self.get_mut(element) {
            e.value = Some(value.to_string());
        }
    }

    fn option_count(&self, element: ElementRef) -> usize {
        self.get(element).map_or(0, |e| e.options.len())
    }

    fn append_option(&mut self, element: ElementRef, value: &str, label: &str) {
        if let Some(e) = self.get_mut(element) {
            e.options.push(SelectOption {
                value: value.to_string(),
                label: label.to_string(),
            });
        }
    }

    fn set_attribute(&mut self, element: ElementRef, name: &str, value: &str) {
        if let Some(e) = self.get_mut(element) {
            e.attributes.insert(name.to_string(), value.to_string());
        }
    }
}
