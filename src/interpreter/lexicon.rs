use crate::graph::NodeKind;
use crate::keywords::keyword_table;

keyword_table! {
    /// Label keywords that decide a node's type, in evaluation order.
    SHAPE_KEYWORDS: NodeKind {
        Start => ["начало", "start", "старт", "begin"],
        End => ["конец", "end", "финиш", "finish", "stop"],
        Decision => ["если", "if", "условие", "condition", "выбор", "choice", "?"],
        Process => ["обработка", "process", "действие", "action", "выполнить", "execute"],
        Data => ["данные", "data", "ввод", "input", "вывод", "output"],
    }
}
