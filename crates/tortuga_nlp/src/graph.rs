/// A grammatical relation between a governing token and a dependent one.
///
/// Labels follow the Stanford/Universal dependency conventions. Subtypes (the part after
/// a colon, as in `nmod:tmod`) are folded into their base relation, except for particles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    Root,
    Subject,
    DirectObject,
    IndirectObject,
    NumericModifier,
    AdverbialModifier,
    AdjectivalModifier,
    Nominal,
    Case,
    Determiner,
    Compound,
    Particle,
    Apposition,
    Conjunction,
    Coordination,
    ClausalComplement,
    OpenClausalComplement,
    AdverbialClause,
    ClausalModifier,
    Parataxis,
    Punctuation,
    Dependent,
    Other(String),
}

impl Relation {
    pub fn from_label(label: &str) -> Relation {
        let label = label.to_ascii_lowercase();
        if label == "compound:prt" {
            return Relation::Particle;
        }
        let base = label.split(':').next().unwrap_or_default();
        match base {
            "root" => Relation::Root,
            "nsubj" | "nsubjpass" | "csubj" | "csubjpass" => Relation::Subject,
            "dobj" | "obj" => Relation::DirectObject,
            "iobj" => Relation::IndirectObject,
            "nummod" | "num" => Relation::NumericModifier,
            "advmod" => Relation::AdverbialModifier,
            "amod" => Relation::AdjectivalModifier,
            "nmod" | "obl" | "npadvmod" | "tmod" | "prep" | "pobj" => Relation::Nominal,
            "case" => Relation::Case,
            "det" | "predet" => Relation::Determiner,
            "compound" | "nn" => Relation::Compound,
            "prt" => Relation::Particle,
            "appos" => Relation::Apposition,
            "conj" => Relation::Conjunction,
            "cc" => Relation::Coordination,
            "ccomp" => Relation::ClausalComplement,
            "xcomp" => Relation::OpenClausalComplement,
            "advcl" => Relation::AdverbialClause,
            "acl" | "vmod" | "partmod" | "rcmod" => Relation::ClausalModifier,
            "parataxis" => Relation::Parataxis,
            "punct" => Relation::Punctuation,
            "dep" => Relation::Dependent,
            _ => Relation::Other(label.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// 1-based position in the sentence.
    pub index: usize,
    pub word: String,
    pub lemma: String,
    /// Penn treebank part-of-speech tag.
    pub pos: String,
}

impl Token {
    pub fn new(index: usize, word: &str, lemma: &str, pos: &str) -> Token {
        Token {
            index,
            word: word.to_owned(),
            lemma: lemma.to_owned(),
            pos: pos.to_owned(),
        }
    }

    pub fn is_proper_noun(&self) -> bool {
        self.pos.starts_with("NNP")
    }

    pub fn is_noun(&self) -> bool {
        self.pos.starts_with("NN")
    }

    pub fn is_cardinal(&self) -> bool {
        self.pos == "CD"
    }

    pub fn is_pronoun(&self) -> bool {
        matches!(self.pos.as_str(), "PRP" | "PRP$" | "WP" | "WP$" | "DT" | "EX")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyEdge {
    /// Index of the governing token, or 0 for the edge into the sentence root.
    pub governor: usize,
    pub dependent: usize,
    pub relation: Relation,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("token {position} has index {found}")]
    TokenOutOfOrder { position: usize, found: usize },
    #[error("edge {governor} -> {dependent} points outside the sentence")]
    DanglingEdge { governor: usize, dependent: usize },
    #[error("token {index} has more than one governor")]
    MultipleGovernors { index: usize },
}

/// The dependency parse of a single sentence.
///
/// Tokens are numbered from 1 and stored in order; every edge points between tokens of this
/// sentence (or from the virtual root 0), and every token has at most one governor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    tokens: Vec<Token>,
    edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    pub fn new(tokens: Vec<Token>, edges: Vec<DependencyEdge>) -> Result<Self, GraphError> {
        for (i, tok) in tokens.iter().enumerate() {
            if tok.index != i + 1 {
                return Err(GraphError::TokenOutOfOrder {
                    position: i + 1,
                    found: tok.index,
                });
            }
        }

        let mut has_governor = vec![false; tokens.len() + 1];
        for e in &edges {
            if e.dependent == 0
                || e.dependent > tokens.len()
                || e.governor > tokens.len()
                || e.governor == e.dependent
            {
                return Err(GraphError::DanglingEdge {
                    governor: e.governor,
                    dependent: e.dependent,
                });
            }
            if std::mem::replace(&mut has_governor[e.dependent], true) {
                return Err(GraphError::MultipleGovernors { index: e.dependent });
            }
        }

        Ok(DependencyGraph { tokens, edges })
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        index.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// The main predicate: the dependent of the edge from 0, or failing that the first token
    /// without a governor.
    pub fn root(&self) -> Option<&Token> {
        if let Some(e) = self.edges.iter().find(|e| e.governor == 0) {
            return self.token(e.dependent);
        }
        self.tokens
            .iter()
            .find(|tok| self.governor(tok.index).is_none())
    }

    pub fn governor(&self, index: usize) -> Option<(&Relation, &Token)> {
        self.edges
            .iter()
            .find(|e| e.dependent == index && e.governor != 0)
            .and_then(|e| Some((&e.relation, self.token(e.governor)?)))
    }

    /// The direct dependents of a token, in sentence order.
    pub fn children(&self, index: usize) -> Vec<(&Relation, &Token)> {
        let mut ret: Vec<_> = self
            .edges
            .iter()
            .filter(|e| e.governor == index && index != 0)
            .filter_map(|e| Some((&e.relation, self.token(e.dependent)?)))
            .collect();
        ret.sort_by_key(|(_, tok)| tok.index);
        ret
    }

    /// Follow a `relation` edge out of the token at `index`.
    pub fn follow(&self, index: usize, relation: &Relation) -> Option<&Token> {
        self.children(index)
            .into_iter()
            .find(|(r, _)| *r == relation)
            .map(|(_, tok)| tok)
    }

    /// The token at `index` and everything below it, in sentence order.
    pub fn subtree(&self, index: usize) -> Vec<&Token> {
        let mut seen = vec![false; self.tokens.len() + 1];
        let mut stack = vec![index];
        let mut ret = Vec::new();
        while let Some(i) = stack.pop() {
            let Some(tok) = self.token(i) else {
                continue;
            };
            if std::mem::replace(&mut seen[i], true) {
                continue;
            }
            ret.push(tok);
            stack.extend(self.children(i).into_iter().map(|(_, t)| t.index));
        }
        ret.sort_by_key(|tok| tok.index);
        ret
    }
}
