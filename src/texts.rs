//! The Brazilian Portuguese text shown in the app.

pub const APP_NAME: &str = "Carteira";

pub mod dashboard {
    pub const TITLE: &str = "Dashboard";
    pub const CURRENT_BALANCE: &str = "Saldo Atual";
    pub const INCOME: &str = "Receitas";
    pub const EXPENSES: &str = "Despesas";
    pub const EXPENSES_BY_CATEGORY: &str = "Despesas por Categoria";
    pub const NO_EXPENSES: &str = "Nenhuma despesa registrada";
}

pub mod register {
    pub const TITLE: &str = "Cadastrar Movimentação";
    pub const EDIT_TITLE: &str = "Editar Movimentação";
    pub const TRANSACTION_TITLE: &str = "Título";
    pub const TRANSACTION_TITLE_PLACEHOLDER: &str = "Digite um título para a transação...";
    pub const VALUE: &str = "Valor";
    pub const VALUE_PLACEHOLDER: &str = "R$ 0,00";
    pub const TYPE: &str = "Tipo";
    pub const CATEGORY: &str = "Categoria";
    pub const PAYMENT_METHOD: &str = "Forma de Pagamento";
    pub const DATE: &str = "Data";
    pub const DESCRIPTION: &str = "Descrição (Opcional)";
    pub const DESCRIPTION_PLACEHOLDER: &str = "Digite uma descrição para a transação...";
    pub const SAVE: &str = "Salvar";
    pub const CANCEL: &str = "Cancelar";
}

pub mod validation {
    pub const TITLE_REQUIRED: &str = "O título é obrigatório";
    pub const AMOUNT_REQUIRED: &str = "O valor é obrigatório";
    pub const AMOUNT_GREATER_THAN_ZERO: &str = "O valor deve ser maior que zero";
    pub const TYPE_REQUIRED: &str = "O tipo é obrigatório";
    pub const CATEGORY_REQUIRED: &str = "A categoria é obrigatória";
    pub const PAYMENT_METHOD_REQUIRED: &str = "A forma de pagamento é obrigatória";
    pub const DATE_REQUIRED: &str = "A data é obrigatória";
    pub const DATE_INVALID: &str = "A data é inválida";
}

pub mod list {
    pub const TITLE: &str = "Transações";
    pub const EMPTY: &str = "Nenhuma transação encontrada";
    pub const EDIT: &str = "Editar";
    pub const DELETE: &str = "Excluir";
    pub const DELETE_CONFIRMATION: &str = "Tem certeza que deseja excluir esta transação?";
}

pub mod notice {
    pub const CREATED: &str = "Transação cadastrada com sucesso!";
    pub const UPDATED: &str = "Transação atualizada com sucesso!";
    pub const DELETED: &str = "Transação excluída com sucesso!";
    pub const CLOSE_NOTIFICATION: &str = "Fechar notificação";
}
